//! # Doe Auth
//!
//! Bearer-token verification for the Doe resource server.
//!
//! - [`claims`]: Claims read from an access token and the authorities they grant
//! - [`keys`]: Loading the RSA public key that signs access tokens
//! - [`jwt`]: Signature verification and claim validation
//!
//! Tokens are issued elsewhere; this crate only verifies them.
//!
//! # Example
//!
//! ```ignore
//! use doe_auth::JwtDecoder;
//! use doe_config::AuthConfig;
//!
//! let decoder = JwtDecoder::from_config(&AuthConfig::from_env())?;
//! let claims = decoder.authenticate(token)?;
//! assert!(claims.has_authority("SCOPE_resource:read"));
//! ```

pub mod claims;
pub mod jwt;
pub mod keys;

// Re-export commonly used types at crate root
pub use claims::{Claims, Scopes};
pub use jwt::{JwtDecoder, JwtError};
pub use keys::{KeyError, load_public_key, public_key_from_str};

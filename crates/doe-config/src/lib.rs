//! # Doe Config
//!
//! Configuration types for the Doe resource server.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`auth`]: Bearer-token verification settings
//! - [`server`]: Listen address, upload limit and request timeout
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`messages`]: Message table namespace and overrides
//!
//! # Example
//!
//! ```ignore
//! use doe_config::{AuthConfig, CorsConfig, MessageConfig, ServerConfig};
//!
//! let auth_config = AuthConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod auth;
pub mod cors;
pub mod messages;
pub mod server;

// Re-export commonly used types at crate root
pub use auth::AuthConfig;
pub use cors::CorsConfig;
pub use messages::MessageConfig;
pub use server::{ServerConfig, parse_data_size};

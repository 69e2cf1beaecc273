//! Middleware and extractors for cross-cutting request handling.
//!
//! # Modules
//!
//! - [`auth`]: Bearer-token extractor and authority-gated extractors
//! - [`security`]: 401/403 responses of the authentication layer
//! - [`exception`]: Translation of raised failures into envelopes
//! - [`response`]: Envelope writing and the response-commit marker
//! - [`limits`]: Upload size and request timeout
//! - [`negotiation`]: `Accept` header checks
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` verifies the token signature and claims
//! 3. Authority extractors check the scopes the token grants
//! 4. Handler executes if all checks pass

pub mod auth;
pub mod exception;
pub mod limits;
pub mod negotiation;
pub mod response;
pub mod security;

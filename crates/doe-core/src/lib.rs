//! # Doe Core
//!
//! Response envelope and failure handling for the Doe resource server.
//!
//! - [`envelope`]: The `{code, message, data}` body every response uses
//! - [`failure`]: The closed taxonomy of request failures
//! - [`classifier`]: Maps a failure to an HTTP status and client message
//! - [`bearer`]: Client diagnostics for rejected bearer tokens
//! - [`binding`]: Structured binding and constraint errors
//! - [`messages`]: Localized message templates
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use doe_core::{ExceptionClassifier, Failure, MessageSource};
//!
//! let classifier = ExceptionClassifier::new(Arc::new(MessageSource::bundled()), "doe");
//! let classified = classifier.classify(&Failure::NotAcceptable);
//! assert_eq!(classified.status.as_u16(), 406);
//! ```

pub mod bearer;
pub mod binding;
pub mod classifier;
pub mod envelope;
pub mod errors;
pub mod failure;
pub mod messages;

// Re-export commonly used types at crate root
pub use bearer::{AuthenticationError, JwtValidationError, TokenIssue, find_jwt_error_message};
pub use classifier::{
    ClassifiedFailure, ERROR_EXCEPTION_ATTRIBUTE, ExceptionClassifier, WebRequest,
};
pub use envelope::BaseRes;
pub use errors::AppError;
pub use failure::{Failure, RaisedFailure};
pub use messages::MessageSource;

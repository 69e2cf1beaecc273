//! Responses written by the authentication and authorization layer.
//!
//! These bypass the exception classifier and write the envelope directly
//! through [`send_json_error_response`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, trace};

use doe_core::AuthenticationError;

use super::response::{is_committed, send_json_error_response};

pub const ACCESS_DENIED_MESSAGE: &str = "Access Denied";

/// 401 for a missing or rejected bearer token.
pub fn bearer_token_entry_point(response: &mut Response, error: &AuthenticationError) {
    debug!(error = %error, "Bearer token authentication failed");
    send_json_error_response(response, StatusCode::UNAUTHORIZED, &error.client_message());
}

/// 403 for credentials that are not a bearer token.
pub fn forbidden_entry_point(response: &mut Response) {
    debug!("Pre-authenticated entry point called. Rejecting access");
    send_json_error_response(response, StatusCode::FORBIDDEN, ACCESS_DENIED_MESSAGE);
}

/// 403 for an authenticated caller lacking `authority`.
pub fn access_denied_handler(response: &mut Response, authority: &str) {
    debug!(authority, "Access denied");

    if is_committed(response) {
        trace!("Did not write to response since already committed");
        return;
    }

    send_json_error_response(response, StatusCode::FORBIDDEN, ACCESS_DENIED_MESSAGE);
}

#[derive(Debug)]
pub enum SecurityRejection {
    Unauthenticated(AuthenticationError),
    UnsupportedScheme,
    AccessDenied { authority: &'static str },
}

impl IntoResponse for SecurityRejection {
    fn into_response(self) -> Response {
        let mut response = Response::default();

        match self {
            SecurityRejection::Unauthenticated(error) => {
                bearer_token_entry_point(&mut response, &error)
            }
            SecurityRejection::UnsupportedScheme => forbidden_entry_point(&mut response),
            SecurityRejection::AccessDenied { authority } => {
                access_denied_handler(&mut response, authority)
            }
        }

        response
    }
}

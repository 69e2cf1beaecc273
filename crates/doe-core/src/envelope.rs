//! The uniform `{code, message, data}` response envelope.
//!
//! Every response written by the server, success or failure, is a
//! [`BaseRes`]. `code` is reserved and always empty; `data` is only
//! populated through [`BaseRes::success`].

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BaseRes<T> {
    /// Reserved, always empty
    pub code: String,
    /// Human-readable outcome
    pub message: String,
    /// Payload, `null` on error paths
    pub data: Option<T>,
}

impl<T> BaseRes<T> {
    pub fn from(message: impl Into<String>) -> Self {
        Self {
            code: String::new(),
            message: message.into(),
            data: None,
        }
    }

    pub fn success(data: T) -> Self {
        Self {
            code: String::new(),
            message: reason_phrase(StatusCode::OK).to_string(),
            data: Some(data),
        }
    }
}

/// Canonical reason phrase of a status, e.g. `"Internal Server Error"`.
pub fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}

//! Request size and duration limits.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use doe_core::Failure;

use crate::state::AppState;

/// Rejects requests whose declared `Content-Length` exceeds the upload limit.
pub async fn upload_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let max = state.server_config.max_upload_size;

    if declared_length(&req).is_some_and(|length| length > max) {
        return Failure::PayloadTooLarge {
            max_upload_size: i64::try_from(max).unwrap_or(i64::MAX),
        }
        .into_response();
    }

    next.run(req).await
}

/// Abandons requests that outlive the configured timeout.
pub async fn request_timeout(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let timeout = state.server_config.request_timeout;
    let path = req.uri().path().to_string();

    match tokio::time::timeout(timeout, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(path = %path, timeout_ms = timeout.as_millis() as u64, "Request timed out");
            Failure::AsyncTimeout.into_response()
        }
    }
}

fn declared_length(req: &Request) -> Option<u64> {
    req.headers()
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

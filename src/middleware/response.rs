//! Writing envelopes into an outgoing response.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use serde::Serialize;
use tracing::trace;

use doe_core::{BaseRes, Failure, WebRequest};

pub const APPLICATION_JSON_UTF8: &str = "application/json;charset=UTF-8";

/// Marks a response whose status and headers have already been sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseCommitted;

/// A server-side failure exposed on the response for downstream consumers.
#[derive(Debug, Clone)]
pub struct ErrorAttribute {
    pub name: &'static str,
    pub failure: Arc<Failure>,
}

pub fn is_committed(response: &Response) -> bool {
    response.extensions().get::<ResponseCommitted>().is_some()
}

/// A response viewed as the in-flight request state the classifier needs.
pub struct ResponseHandle<'a> {
    response: &'a mut Response,
}

impl<'a> ResponseHandle<'a> {
    pub fn new(response: &'a mut Response) -> Self {
        Self { response }
    }
}

impl WebRequest for ResponseHandle<'_> {
    fn is_committed(&self) -> bool {
        is_committed(self.response)
    }

    fn set_attribute(&mut self, name: &'static str, failure: Arc<Failure>) {
        self.response
            .extensions_mut()
            .insert(ErrorAttribute { name, failure });
    }
}

/// Replaces status, content type and body with `body` rendered as JSON.
/// Falls back to the bare message if serialization fails.
pub fn write_envelope<T: Serialize>(response: &mut Response, status: StatusCode, body: &BaseRes<T>) {
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(APPLICATION_JSON_UTF8),
    );
    headers.remove(header::CONTENT_LENGTH);

    *response.body_mut() = match serde_json::to_vec(body) {
        Ok(bytes) => Body::from(bytes),
        Err(e) => {
            trace!(error = %e, "Failed to serialize response envelope");
            Body::from(body.message.clone())
        }
    };
}

pub fn send_json_error_response(response: &mut Response, status: StatusCode, message: &str) {
    write_envelope(response, status, &BaseRes::<()>::from(message));
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_send_json_error_response() {
        let mut response = Response::default();

        send_json_error_response(&mut response, StatusCode::FORBIDDEN, "Access Denied");

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            APPLICATION_JSON_UTF8
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            &body[..],
            br#"{"code":"","message":"Access Denied","data":null}"#
        );
    }

    #[test]
    fn test_handle_reports_commit_marker() {
        let mut response = Response::default();
        assert!(!ResponseHandle::new(&mut response).is_committed());

        response.extensions_mut().insert(ResponseCommitted);
        assert!(ResponseHandle::new(&mut response).is_committed());
    }

    #[test]
    fn test_handle_stores_attribute() {
        let mut response = Response::default();

        ResponseHandle::new(&mut response)
            .set_attribute("doe.error.exception", Arc::new(Failure::AsyncTimeout));

        let attribute = response.extensions().get::<ErrorAttribute>().unwrap();
        assert_eq!(attribute.name, "doe.error.exception");
        assert!(matches!(*attribute.failure, Failure::AsyncTimeout));
    }
}

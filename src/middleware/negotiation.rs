//! `Accept` header negotiation for JSON endpoints.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use doe_core::Failure;

const JSON_RANGES: [&str; 3] = ["*/*", "application/*", "application/json"];

/// Raises [`Failure::NotAcceptable`] when the client accepts no JSON
/// representation. A missing or unreadable `Accept` header accepts anything.
pub async fn require_json_acceptable(req: Request, next: Next) -> Response {
    let accept = req
        .headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());

    match accept {
        Some(accept) if !accepts_json(accept) => Failure::NotAcceptable.into_response(),
        _ => next.run(req).await,
    }
}

pub fn accepts_json(accept: &str) -> bool {
    if accept.trim().is_empty() {
        return true;
    }

    accept.split(',').any(|range| {
        let mut parts = range.split(';');
        let media_type = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        let rejected = parts.any(|param| {
            param
                .trim()
                .strip_prefix("q=")
                .and_then(|q| q.trim().parse::<f32>().ok())
                == Some(0.0)
        });

        !rejected && JSON_RANGES.contains(&media_type.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_json() {
        assert!(accepts_json("application/json"));
        assert!(accepts_json("text/html, application/json;q=0.9"));
        assert!(accepts_json("*/*"));
        assert!(accepts_json("Application/*"));
        assert!(accepts_json(""));
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(!accepts_json("text/html"));
        assert!(!accepts_json("application/xml, text/plain"));
        assert!(!accepts_json("application/json;q=0"));
    }
}

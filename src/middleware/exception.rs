//! Outermost failure translation.
//!
//! Anything below this layer reports a failure by returning a [`Failure`]
//! (directly or as an extractor rejection). Its response carries a
//! [`RaisedFailure`] which is swapped here for the classified envelope.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use doe_core::{ExceptionClassifier, Failure, RaisedFailure};

use super::response::{ResponseHandle, write_envelope};
use crate::state::AppState;

pub async fn exception_handler(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;

    if let Some(RaisedFailure(failure)) = response.extensions_mut().remove::<RaisedFailure>() {
        write_error_response(&state.classifier, failure, &mut response);
    }

    response
}

/// Classifies `failure` and writes its envelope, unless the response is
/// already committed.
pub fn write_error_response(
    classifier: &ExceptionClassifier,
    failure: Arc<Failure>,
    response: &mut Response,
) {
    let outcome = classifier.handle(failure, &mut ResponseHandle::new(response));

    if let Some((status, body)) = outcome {
        write_envelope(response, status, &body);
    }
}

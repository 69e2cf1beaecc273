//! The closed taxonomy of failures raised while handling a request.
//!
//! Handlers, extractors and middleware return [`Failure`]; its
//! [`IntoResponse`] impl only parks the failure in the response extensions.
//! The exception-handler middleware picks it up and lets the
//! [`ExceptionClassifier`](crate::classifier::ExceptionClassifier) write the
//! envelope.

use std::sync::Arc;

use axum::extract::path::ErrorKind;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::bearer::AuthenticationError;
use crate::binding::{BindingErrors, ConstraintViolation};
use crate::errors::AppError;

/// Marker for "the size limit was not known where the failure was raised".
pub const UNKNOWN_UPLOAD_SIZE: i64 = -1;

#[derive(Debug, Error)]
pub enum Failure {
    #[error("Validation failed for object '{}'", .0.object_name)]
    Bind(BindingErrors),
    #[error("Constraint violations: {}", .0.len())]
    ConstraintViolation(Vec<ConstraintViolation>),
    #[error("Failed to read request: {0}")]
    MessageNotReadable(String),
    #[error("Required request parameter '{name}' for method parameter type {parameter_type} is not present")]
    MissingParameter { name: String, parameter_type: String },
    #[error("Required part '{name}' is not present")]
    MissingPart { name: String },
    #[error("{0}")]
    RequestBinding(String),
    #[error("Failed to convert value '{value}' of '{name}' to required type '{required_type}'")]
    TypeMismatch {
        required_type: String,
        name: String,
        value: String,
    },
    #[error("Required URI template variable '{name}' is not present")]
    MissingPathVariable { name: String },
    #[error("Handler method validation failed: {0}")]
    HandlerMethodValidation(String),
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),
    #[error("No endpoint {method} {path}.")]
    NoHandlerFound { method: String, path: String },
    #[error("No static resource {path}.")]
    NoResourceFound { path: String },
    #[error("Request method '{method}' is not supported")]
    MethodNotAllowed { method: String },
    #[error("No acceptable representation")]
    NotAcceptable,
    #[error("Maximum upload size of {max_upload_size} bytes exceeded")]
    PayloadTooLarge { max_upload_size: i64 },
    #[error("{}", media_type_message(.content_type))]
    UnsupportedMediaType { content_type: String },
    #[error(transparent)]
    Application(#[from] AppError),
    #[error("Failed to convert value '{value}' of '{name}' to required type '{required_type}'")]
    ConversionNotSupported {
        required_type: String,
        name: String,
        value: String,
    },
    #[error("Could not write response: {0}")]
    MessageNotWritable(String),
    #[error("{0}")]
    IllegalArgument(String),
    #[error("Method validation failed: {0}")]
    MethodValidation(String),
    #[error("Data access failure: {0}")]
    DataAccess(#[from] sqlx::Error),
    #[error("Transaction failure: {0}")]
    Transaction(String),
    #[error("Asynchronous request timed out")]
    AsyncTimeout,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Failure {
    /// Stable name of the variant, used in logs and message keys.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Failure::Bind(_) => "Bind",
            Failure::ConstraintViolation(_) => "ConstraintViolation",
            Failure::MessageNotReadable(_) => "MessageNotReadable",
            Failure::MissingParameter { .. } => "MissingParameter",
            Failure::MissingPart { .. } => "MissingPart",
            Failure::RequestBinding(_) => "RequestBinding",
            Failure::TypeMismatch { .. } => "ArgumentTypeMismatch",
            Failure::MissingPathVariable { .. } => "MissingPathVariable",
            Failure::HandlerMethodValidation(_) => "HandlerMethodValidation",
            Failure::Authentication(_) => "Authentication",
            Failure::NoHandlerFound { .. } => "NoHandlerFound",
            Failure::NoResourceFound { .. } => "NoResourceFound",
            Failure::MethodNotAllowed { .. } => "MethodNotAllowed",
            Failure::NotAcceptable => "NotAcceptable",
            Failure::PayloadTooLarge { .. } => "PayloadTooLarge",
            Failure::UnsupportedMediaType { .. } => "UnsupportedMediaType",
            Failure::Application(_) => "Application",
            Failure::ConversionNotSupported { .. } => "ConversionNotSupported",
            Failure::MessageNotWritable(_) => "MessageNotWritable",
            Failure::IllegalArgument(_) => "IllegalArgument",
            Failure::MethodValidation(_) => "MethodValidation",
            Failure::DataAccess(_) => "DataAccess",
            Failure::Transaction(_) => "Transaction",
            Failure::AsyncTimeout => "AsyncTimeout",
            Failure::Other(_) => "Other",
        }
    }

    pub fn bind(object_name: &str, errors: &validator::ValidationErrors) -> Self {
        Failure::Bind(BindingErrors::from_validation(object_name, errors))
    }

    pub fn constraint_violation(errors: &validator::ValidationErrors) -> Self {
        Failure::ConstraintViolation(ConstraintViolation::from_validation(errors))
    }
}

/// A failure travelling from a handler to the exception-handler middleware.
#[derive(Debug, Clone)]
pub struct RaisedFailure(pub Arc<Failure>);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response
            .extensions_mut()
            .insert(RaisedFailure(Arc::new(self)));
        response
    }
}

impl From<JsonRejection> for Failure {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => Failure::UnsupportedMediaType {
                content_type: String::new(),
            },
            JsonRejection::BytesRejection(inner)
                if inner.status() == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                Failure::PayloadTooLarge {
                    max_upload_size: UNKNOWN_UPLOAD_SIZE,
                }
            }
            other => Failure::MessageNotReadable(other.body_text()),
        }
    }
}

impl From<QueryRejection> for Failure {
    fn from(rejection: QueryRejection) -> Self {
        let text = rejection.body_text();

        match missing_field_name(&text) {
            Some(name) => Failure::MissingParameter {
                name,
                parameter_type: "String".to_string(),
            },
            None => Failure::RequestBinding(text),
        }
    }
}

impl From<PathRejection> for Failure {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(inner) => match inner.into_kind() {
                ErrorKind::ParseErrorAtKey {
                    key,
                    value,
                    expected_type,
                } => Failure::TypeMismatch {
                    required_type: expected_type.to_string(),
                    name: key,
                    value,
                },
                other => Failure::RequestBinding(other.to_string()),
            },
            // Raised for routes without any path parameter, so there is no
            // variable name to report.
            PathRejection::MissingPathParams(inner) => Failure::RequestBinding(inner.body_text()),
            other => Failure::RequestBinding(other.body_text()),
        }
    }
}

fn media_type_message(content_type: &str) -> String {
    if content_type.is_empty() {
        "Content-Type is not supported".to_string()
    } else {
        format!("Content-Type '{content_type}' is not supported")
    }
}

/// Extracts `x` from serde's "missing field `x`".
fn missing_field_name(message: &str) -> Option<String> {
    message
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
        .map(str::to_string)
}

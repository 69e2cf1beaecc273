//! Failure → `(status, message)` classification.
//!
//! [`ExceptionClassifier::classify`] is a total function over [`Failure`].
//! [`ExceptionClassifier::handle`] adds the side effects around it: logging
//! by status class, the response-commit guard and the error attribute for
//! server errors.

use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{Level, debug, info, warn};

use crate::binding::{BindingErrors, ObjectError};
use crate::envelope::{BaseRes, reason_phrase};
use crate::failure::{Failure, UNKNOWN_UPLOAD_SIZE};
use crate::messages::MessageSource;

pub const BAD_REQUEST_MESSAGE: &str = "Invalid Parameters Found";

/// Request attribute under which a server-side failure is exposed to
/// downstream error rendering.
pub const ERROR_EXCEPTION_ATTRIBUTE: &str = "doe.error.exception";

const TYPE_MISMATCH_CODE: &str = "TypeMismatch";

/// The in-flight request as seen by the classifier.
pub trait WebRequest {
    /// Whether the transport has already started writing the response.
    fn is_committed(&self) -> bool;

    fn set_attribute(&mut self, name: &'static str, failure: Arc<Failure>);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFailure {
    /// Status written to the wire
    pub status: StatusCode,
    /// Status used for log severity and the error attribute
    pub reported_status: StatusCode,
    pub message: String,
}

impl ClassifiedFailure {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            reported_status: status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn internal_generic() -> Self {
        Self::internal(reason_phrase(StatusCode::INTERNAL_SERVER_ERROR))
    }
}

#[derive(Debug, Clone)]
pub struct ExceptionClassifier {
    messages: Arc<MessageSource>,
    namespace: String,
    max_upload_size: Option<i64>,
}

impl ExceptionClassifier {
    pub fn new(messages: Arc<MessageSource>, namespace: impl Into<String>) -> Self {
        Self {
            messages,
            namespace: namespace.into(),
            max_upload_size: None,
        }
    }

    /// Reports `max_upload_size` for size failures raised without a known limit.
    pub fn with_max_upload_size(mut self, max_upload_size: i64) -> Self {
        self.max_upload_size = Some(max_upload_size);
        self
    }

    pub fn classify(&self, failure: &Failure) -> ClassifiedFailure {
        match failure {
            Failure::Bind(errors) => ClassifiedFailure::bad_request(self.bind_message(errors)),
            Failure::ConstraintViolation(violations) => ClassifiedFailure::bad_request(
                violations
                    .first()
                    .map(|v| format!("{} {}", v.property_path, v.message))
                    .unwrap_or_else(|| BAD_REQUEST_MESSAGE.to_string()),
            ),
            Failure::MessageNotReadable(_) => {
                ClassifiedFailure::bad_request("Failed to read request")
            }
            Failure::MissingParameter {
                name,
                parameter_type,
            } => ClassifiedFailure::bad_request(self.validation_message(
                "MissingParameter",
                &[parameter_type.as_str(), name.as_str()],
            )),
            Failure::MissingPart { name } => ClassifiedFailure::bad_request(
                self.validation_message("MissingPart", &[name.as_str()]),
            ),
            Failure::RequestBinding(_) => ClassifiedFailure::bad_request(
                "Unrecoverable fatal binding exception occurred",
            ),
            Failure::TypeMismatch {
                required_type,
                name,
                value,
            } => ClassifiedFailure::bad_request(self.validation_message(
                failure.kind_name(),
                &[required_type.as_str(), name.as_str(), value.as_str()],
            )),
            Failure::MissingPathVariable { name } => ClassifiedFailure::bad_request(format!(
                "URI path variable {name} is not present"
            )),
            Failure::HandlerMethodValidation(_) => {
                ClassifiedFailure::bad_request(reason_phrase(StatusCode::BAD_REQUEST))
            }
            Failure::Authentication(error) => {
                ClassifiedFailure::new(StatusCode::UNAUTHORIZED, error.client_message())
            }
            Failure::NoHandlerFound { .. } | Failure::NoResourceFound { .. } => {
                ClassifiedFailure::new(StatusCode::NOT_FOUND, failure.to_string())
            }
            Failure::MethodNotAllowed { .. } => {
                ClassifiedFailure::new(StatusCode::METHOD_NOT_ALLOWED, failure.to_string())
            }
            Failure::NotAcceptable => {
                ClassifiedFailure::new(StatusCode::NOT_ACCEPTABLE, failure.to_string())
            }
            Failure::PayloadTooLarge { max_upload_size } => {
                let max_upload_size = match (*max_upload_size, self.max_upload_size) {
                    (UNKNOWN_UPLOAD_SIZE, Some(configured)) => configured,
                    (raised, _) => raised,
                };

                ClassifiedFailure::new(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!("Maximum upload size exceeded ({max_upload_size})"),
                )
            }
            Failure::UnsupportedMediaType { .. } => {
                ClassifiedFailure::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, failure.to_string())
            }
            Failure::Application(error) => ClassifiedFailure::internal(error.message()),
            Failure::ConversionNotSupported {
                required_type,
                name,
                value,
            } => ClassifiedFailure::internal(self.validation_message(
                failure.kind_name(),
                &[required_type.as_str(), name.as_str(), value.as_str()],
            )),
            Failure::MessageNotWritable(_) => ClassifiedFailure::internal("Failed to write request"),
            Failure::IllegalArgument(_) => ClassifiedFailure::internal_generic(),
            Failure::MethodValidation(_) => ClassifiedFailure::internal("Method validation failed"),
            Failure::DataAccess(_) | Failure::Transaction(_) => {
                ClassifiedFailure::internal_generic()
            }
            // Written as 503, but logged and attributed as a 500.
            Failure::AsyncTimeout => ClassifiedFailure {
                status: StatusCode::SERVICE_UNAVAILABLE,
                reported_status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Asynchronous request time out".to_string(),
            },
            Failure::Other(_) => ClassifiedFailure::internal_generic(),
        }
    }

    /// Classifies, logs and guards against writing into a committed response.
    ///
    /// Returns `None` when nothing must be written.
    pub fn handle<R>(
        &self,
        failure: Arc<Failure>,
        request: &mut R,
    ) -> Option<(StatusCode, BaseRes<()>)>
    where
        R: WebRequest + ?Sized,
    {
        let classified = self.classify(&failure);
        log_failure(&failure, &classified);

        if request.is_committed() {
            warn!(
                failure = failure.kind_name(),
                "Response already committed. Ignoring"
            );
            return None;
        }

        if classified.reported_status == StatusCode::INTERNAL_SERVER_ERROR {
            request.set_attribute(ERROR_EXCEPTION_ATTRIBUTE, Arc::clone(&failure));
        }

        Some((classified.status, BaseRes::from(classified.message)))
    }

    fn bind_message(&self, errors: &BindingErrors) -> String {
        let Some(error) = errors.first() else {
            return BAD_REQUEST_MESSAGE.to_string();
        };

        let arguments: Vec<&str> = error.arguments.iter().map(String::as_str).collect();

        error
            .codes
            .iter()
            .map(|code| self.messages.resolve(code, &arguments, ""))
            .find(|message| has_text(message))
            .unwrap_or_else(|| self.object_error_fallback(error))
    }

    fn object_error_fallback(&self, error: &ObjectError) -> String {
        match &error.field {
            Some(field)
                if error
                    .code
                    .as_deref()
                    .is_some_and(|code| code.eq_ignore_ascii_case(TYPE_MISMATCH_CODE)) =>
            {
                let rejected = field.rejected_value.as_deref().unwrap_or("null");
                self.validation_message(TYPE_MISMATCH_CODE, &[field.field.as_str(), rejected])
            }
            Some(field) => error
                .default_message
                .as_ref()
                .map(|message| format!("{}: {}", field.field, message))
                .unwrap_or_else(|| BAD_REQUEST_MESSAGE.to_string()),
            None => error
                .default_message
                .clone()
                .unwrap_or_else(|| BAD_REQUEST_MESSAGE.to_string()),
        }
    }

    fn validation_message(&self, name: &str, args: &[&str]) -> String {
        let key = format!("{}.validation.exceptions.{}.message", self.namespace, name);
        self.messages.resolve(&key, args, BAD_REQUEST_MESSAGE)
    }
}

/// Log severity for a classified failure.
pub fn severity(classified: &ClassifiedFailure) -> Level {
    let status = classified.reported_status;

    if status == StatusCode::BAD_REQUEST {
        Level::DEBUG
    } else if status.is_client_error() {
        Level::INFO
    } else {
        Level::WARN
    }
}

fn log_failure(failure: &Failure, classified: &ClassifiedFailure) {
    debug!(
        status = classified.reported_status.as_u16(),
        message = %classified.message,
        "Classified request failure"
    );

    let level = severity(classified);

    if level == Level::DEBUG {
        debug!(failure = failure.kind_name(), error = ?failure, "Bad request");
    } else if level == Level::INFO {
        info!(failure = failure.kind_name(), error = %failure, "Client error");
    } else if let Some(cause) = application_cause(failure) {
        warn!(failure = failure.kind_name(), error = %cause, "Application failure");
    } else {
        warn!(failure = failure.kind_name(), error = %failure, "Server error");
    }
}

fn application_cause(failure: &Failure) -> Option<&(dyn std::error::Error + Send + Sync)> {
    match failure {
        Failure::Application(error) => error.cause(),
        _ => None,
    }
}

fn has_text(value: &str) -> bool {
    value.chars().any(|c| !c.is_whitespace())
}

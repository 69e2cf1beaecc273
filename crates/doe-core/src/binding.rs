//! Structured binding and constraint failures.
//!
//! These mirror what a request binder knows about a rejected input: which
//! object and field failed, the candidate message codes to look up, the
//! arguments for the template and a default message.

use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDetail {
    pub field: String,
    pub rejected_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectError {
    pub object_name: String,
    pub code: Option<String>,
    /// Candidate message codes, most specific first
    pub codes: Vec<String>,
    pub arguments: Vec<String>,
    pub default_message: Option<String>,
    pub field: Option<FieldDetail>,
}

impl ObjectError {
    pub fn global(object_name: impl Into<String>, default_message: Option<String>) -> Self {
        Self {
            object_name: object_name.into(),
            code: None,
            codes: Vec::new(),
            arguments: Vec::new(),
            default_message,
            field: None,
        }
    }

    /// A field error whose codes follow `code.object.field`, `code.field`, `code`.
    pub fn field(
        object_name: &str,
        field: &str,
        code: &str,
        rejected_value: Option<String>,
        default_message: Option<String>,
    ) -> Self {
        Self {
            object_name: object_name.to_string(),
            code: Some(code.to_string()),
            codes: vec![
                format!("{code}.{object_name}.{field}"),
                format!("{code}.{field}"),
                code.to_string(),
            ],
            arguments: vec![
                field.to_string(),
                rejected_value.clone().unwrap_or_default(),
            ],
            default_message,
            field: Some(FieldDetail {
                field: field.to_string(),
                rejected_value,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingErrors {
    pub object_name: String,
    pub errors: Vec<ObjectError>,
}

impl BindingErrors {
    pub fn new(object_name: impl Into<String>, errors: Vec<ObjectError>) -> Self {
        Self {
            object_name: object_name.into(),
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn first(&self) -> Option<&ObjectError> {
        self.errors.first()
    }

    pub fn from_validation(object_name: &str, errors: &ValidationErrors) -> Self {
        let errors = sorted_field_errors(errors)
            .into_iter()
            .map(|(field, error)| {
                ObjectError::field(
                    object_name,
                    &field,
                    &error.code,
                    rejected_value(error),
                    error.message.as_ref().map(|m| m.to_string()),
                )
            })
            .collect();

        Self::new(object_name, errors)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub property_path: String,
    pub message: String,
}

impl ConstraintViolation {
    pub fn from_validation(errors: &ValidationErrors) -> Vec<Self> {
        sorted_field_errors(errors)
            .into_iter()
            .map(|(field, error)| ConstraintViolation {
                property_path: field,
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string()),
            })
            .collect()
    }
}

/// Field errors ordered by field name, so "the first error" is stable.
fn sorted_field_errors(errors: &ValidationErrors) -> Vec<(String, &ValidationError)> {
    let mut flattened: Vec<(String, &ValidationError)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            let field = field.to_string();
            errors.iter().map(move |error| (field.clone(), error))
        })
        .collect();

    flattened.sort_by(|a, b| a.0.cmp(&b.0));
    flattened
}

fn rejected_value(error: &ValidationError) -> Option<String> {
    error.params.get("value").map(|value| match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

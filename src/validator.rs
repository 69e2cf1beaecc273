//! Validating extractors.
//!
//! Rejections and validation errors surface as [`Failure`]s so they reach
//! the client through the classified envelope.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request, rejection::JsonRejection},
    http::{header, request::Parts},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use doe_core::Failure;

/// JSON body, validated. Invalid fields become a bind failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::MissingJsonContentType(_) => {
                    Failure::UnsupportedMediaType { content_type }
                }
                other => Failure::from(other),
            })?;

        value
            .validate()
            .map_err(|errors| Failure::bind(&object_name::<T>(), &errors))?;

        Ok(ValidatedJson(value))
    }
}

/// Query string, validated. Invalid fields become constraint violations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;

        value
            .validate()
            .map_err(|errors| Failure::constraint_violation(&errors))?;

        Ok(ValidatedQuery(value))
    }
}

/// `CreateUserDto` → `createUserDto`.
fn object_name<T>() -> String {
    let type_name = std::any::type_name::<T>();
    let short = type_name
        .split('<')
        .next()
        .and_then(|path| path.rsplit("::").next())
        .unwrap_or(type_name);

    let mut chars = short.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CreateInfoForm;

    #[test]
    fn test_object_name() {
        assert_eq!(object_name::<CreateInfoForm>(), "createInfoForm");
        assert_eq!(object_name::<Vec<String>>(), "vec");
    }
}

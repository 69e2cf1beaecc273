//! Bearer-token authentication failures and their client-facing diagnostics.

use std::error::Error as StdError;

use thiserror::Error;

/// OAuth2 error code used for every rejected token.
pub const INVALID_TOKEN: &str = "invalid_token";

pub const INVALID_BEARER_TOKEN_MESSAGE: &str = "Invalid Bearer Token";
const INVALID_JWT_MESSAGE: &str = "Invalid Jwt";

/// One reason a signed token was rejected by claim validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIssue {
    pub code: String,
    pub description: Option<String>,
}

impl TokenIssue {
    pub fn invalid_token(description: impl Into<String>) -> Self {
        Self {
            code: INVALID_TOKEN.to_string(),
            description: Some(description.into()),
        }
    }
}

/// A token whose signature verified but whose claims did not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", first_description(.issues))]
pub struct JwtValidationError {
    issues: Vec<TokenIssue>,
}

impl JwtValidationError {
    pub fn new(issues: Vec<TokenIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[TokenIssue] {
        &self.issues
    }
}

fn first_description(issues: &[TokenIssue]) -> &str {
    issues
        .first()
        .and_then(|issue| issue.description.as_deref())
        .unwrap_or("Unable to validate Jwt")
}

#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("Full authentication is required to access this resource")]
    MissingToken,
    #[error("{message}")]
    InvalidToken {
        message: String,
        #[source]
        cause: Box<dyn StdError + Send + Sync + 'static>,
    },
}

impl AuthenticationError {
    pub fn invalid_token<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::InvalidToken {
            message: message.into(),
            cause: Box::new(cause),
        }
    }

    /// Diagnostic sent to the client for this failure.
    pub fn client_message(&self) -> String {
        find_jwt_error_message(self.source())
    }
}

/// Produces `"<code> : <description>"` for the first claim-validation issue
/// when `cause` is a [`JwtValidationError`], and `"Invalid Bearer Token"`
/// for anything else.
pub fn find_jwt_error_message(cause: Option<&(dyn StdError + 'static)>) -> String {
    match cause.and_then(|e| e.downcast_ref::<JwtValidationError>()) {
        Some(validation) => validation
            .issues()
            .first()
            .map(|issue| {
                format!(
                    "{} : {}",
                    issue.code,
                    issue.description.as_deref().unwrap_or("")
                )
            })
            .unwrap_or_else(|| INVALID_JWT_MESSAGE.to_string()),
        None => INVALID_BEARER_TOKEN_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_cause_reports_first_issue() {
        let validation = JwtValidationError::new(vec![
            TokenIssue::invalid_token("Jwt expired at 2024-07-08T00:00:00Z"),
            TokenIssue::invalid_token("The iss claim is not valid"),
        ]);

        let message = find_jwt_error_message(Some(&validation));

        assert_eq!(message, "invalid_token : Jwt expired at 2024-07-08T00:00:00Z");
    }

    #[test]
    fn test_missing_description_renders_empty() {
        let validation = JwtValidationError::new(vec![TokenIssue {
            code: "invalid_request".to_string(),
            description: None,
        }]);

        assert_eq!(
            find_jwt_error_message(Some(&validation)),
            "invalid_request : "
        );
    }

    #[test]
    fn test_empty_issue_list() {
        let validation = JwtValidationError::new(vec![]);

        assert_eq!(find_jwt_error_message(Some(&validation)), "Invalid Jwt");
    }

    #[test]
    fn test_validation_error_display() {
        let validation = JwtValidationError::new(vec![
            TokenIssue::invalid_token("Jwt used before 2100-01-01T00:00:00Z"),
            TokenIssue::invalid_token("The iss claim is not valid"),
        ]);

        assert_eq!(validation.to_string(), "Jwt used before 2100-01-01T00:00:00Z");
        assert!(validation.source().is_none());
        assert_eq!(
            JwtValidationError::new(vec![]).to_string(),
            "Unable to validate Jwt"
        );
    }

    #[test]
    fn test_other_cause_is_generic() {
        let io = std::io::Error::other("Signed JWT rejected: Invalid signature");

        assert_eq!(find_jwt_error_message(Some(&io)), "Invalid Bearer Token");
        assert_eq!(find_jwt_error_message(None), "Invalid Bearer Token");
    }

    #[test]
    fn test_authentication_error_walks_cause() {
        let error = AuthenticationError::invalid_token(
            "Jwt expired at 2024-07-08T00:00:00Z",
            JwtValidationError::new(vec![TokenIssue::invalid_token(
                "Jwt expired at 2024-07-08T00:00:00Z",
            )]),
        );

        assert_eq!(
            error.client_message(),
            "invalid_token : Jwt expired at 2024-07-08T00:00:00Z"
        );
        assert_eq!(
            AuthenticationError::MissingToken.client_message(),
            "Invalid Bearer Token"
        );
    }
}

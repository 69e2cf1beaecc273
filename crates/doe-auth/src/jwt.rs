//! Access-token verification.
//!
//! Verification happens in two steps. The signature is checked first, with
//! `jsonwebtoken` restricted to the RSA family. The claims are then run
//! through every validator and all issues are collected, so a token that is
//! both expired and from the wrong issuer reports both.
//!
//! # Example
//!
//! ```ignore
//! let decoder = JwtDecoder::from_config(&auth_config)?;
//!
//! match decoder.authenticate(token) {
//!     Ok(claims) => println!("authorities: {:?}", claims.authorities()),
//!     Err(e) => println!("rejected: {}", e.client_message()),
//! }
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;
use tracing::debug;

use doe_config::AuthConfig;
use doe_core::bearer::{AuthenticationError, JwtValidationError, TokenIssue};

use crate::claims::Claims;
use crate::keys::{KeyError, load_public_key};

#[derive(Debug, Error)]
pub enum JwtError {
    /// Malformed token or signature mismatch
    #[error("An error occurred while attempting to decode the Jwt: {0}")]
    BadJwt(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Validation(#[from] JwtValidationError),
}

#[derive(Clone)]
pub struct JwtDecoder {
    key: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
    clock_skew_secs: i64,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("issuer", &self.issuer)
            .field("clock_skew_secs", &self.clock_skew_secs)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    pub fn new(key: DecodingKey, issuer: Option<String>, clock_skew_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.algorithms = vec![Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];
        // Timestamps and issuer are checked by our own validators.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key,
            validation,
            issuer,
            clock_skew_secs: i64::try_from(clock_skew_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, KeyError> {
        let key = load_public_key(&config.public_key_path)?;

        Ok(Self::new(
            key,
            config.issuer.clone(),
            config.clock_skew_secs,
        ))
    }

    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)?.claims;
        let issues = self.validate(&claims, Utc::now().timestamp());

        if issues.is_empty() {
            Ok(claims)
        } else {
            Err(JwtValidationError::new(issues).into())
        }
    }

    /// Decodes `token`, turning any failure into an [`AuthenticationError`].
    pub fn authenticate(&self, token: &str) -> Result<Claims, AuthenticationError> {
        self.decode(token).map_err(|error| {
            debug!(error = %error, "Bearer token rejected");
            let message = error.to_string();

            match error {
                JwtError::BadJwt(cause) => AuthenticationError::invalid_token(message, cause),
                JwtError::Validation(cause) => AuthenticationError::invalid_token(message, cause),
            }
        })
    }

    fn validate(&self, claims: &Claims, now: i64) -> Vec<TokenIssue> {
        let mut issues = Vec::new();

        if let Some(exp) = claims.exp {
            if now.saturating_sub(self.clock_skew_secs) > exp {
                issues.push(TokenIssue::invalid_token(format!(
                    "Jwt expired at {}",
                    instant(exp)
                )));
            }
        }

        if let Some(nbf) = claims.nbf {
            if now.saturating_add(self.clock_skew_secs) < nbf {
                issues.push(TokenIssue::invalid_token(format!(
                    "Jwt used before {}",
                    instant(nbf)
                )));
            }
        }

        if let Some(expected) = &self.issuer {
            if claims.iss.as_deref() != Some(expected.as_str()) {
                issues.push(TokenIssue::invalid_token("The iss claim is not valid"));
            }
        }

        issues
    }
}

fn instant(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| timestamp.to_string())
}

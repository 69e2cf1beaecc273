//! Access-token claims.
//!
//! Scopes may arrive in `scope` or `scp`, either as one space-delimited
//! string or as a list. Each scope grants the authority `SCOPE_<scope>`.

use serde::{Deserialize, Serialize};

pub const SCOPE_AUTHORITY_PREFIX: &str = "SCOPE_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scopes {
    Delimited(String),
    List(Vec<String>),
}

impl Scopes {
    pub fn iter(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Scopes::Delimited(scopes) => Box::new(scopes.split_whitespace()),
            Scopes::List(scopes) => Box::new(
                scopes
                    .iter()
                    .map(String::as_str)
                    .filter(|s| !s.trim().is_empty()),
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Expiration (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Not-before (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    /// Issued-at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scopes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scp: Option<Scopes>,
}

impl Claims {
    /// Authorities granted by the first scope claim present, `scope` before `scp`.
    pub fn authorities(&self) -> Vec<String> {
        self.scope
            .as_ref()
            .or(self.scp.as_ref())
            .map(|scopes| {
                scopes
                    .iter()
                    .map(|scope| format!("{SCOPE_AUTHORITY_PREFIX}{scope}"))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities().iter().any(|a| a == authority)
    }
}

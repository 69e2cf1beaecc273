//! Bearer-token verification settings.
//!
//! - `AUTH_RSA_PUBLIC_KEY_PATH`: RSA public key, PEM or bare base64 X.509 (default: `keys/jwt_public.pem`)
//! - `AUTH_ISSUER`: Expected `iss` claim, unchecked when unset
//! - `AUTH_CLOCK_SKEW_SECS`: Tolerance for `exp` / `nbf` checks (default: 60)

use std::env;
use std::path::PathBuf;

const DEFAULT_PUBLIC_KEY_PATH: &str = "keys/jwt_public.pem";
const DEFAULT_CLOCK_SKEW_SECS: u64 = 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    pub public_key_path: PathBuf,
    pub issuer: Option<String>,
    pub clock_skew_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            public_key_path: PathBuf::from(DEFAULT_PUBLIC_KEY_PATH),
            issuer: None,
            clock_skew_secs: DEFAULT_CLOCK_SKEW_SECS,
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            public_key_path: env::var("AUTH_RSA_PUBLIC_KEY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PUBLIC_KEY_PATH)),
            issuer: env::var("AUTH_ISSUER")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            clock_skew_secs: env::var("AUTH_CLOCK_SKEW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CLOCK_SKEW_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();

        assert_eq!(config.public_key_path, PathBuf::from("keys/jwt_public.pem"));
        assert!(config.issuer.is_none());
        assert_eq!(config.clock_skew_secs, 60);
    }
}

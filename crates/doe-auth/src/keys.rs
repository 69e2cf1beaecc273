//! RSA public key loading.
//!
//! The key file holds an X.509 `SubjectPublicKeyInfo`, either PEM-armoured
//! or as a bare base64 body.

use std::path::Path;

use jsonwebtoken::DecodingKey;
use thiserror::Error;

const PEM_BEGIN: &str = "-----BEGIN PUBLIC KEY-----";
const PEM_END: &str = "-----END PUBLIC KEY-----";
const PEM_LINE_WIDTH: usize = 64;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("failed to read public key {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("public key is empty")]
    Empty,
    #[error("invalid RSA public key: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

pub fn load_public_key(path: &Path) -> Result<DecodingKey, KeyError> {
    let contents = std::fs::read_to_string(path).map_err(|source| KeyError::Io {
        path: path.display().to_string(),
        source,
    })?;

    public_key_from_str(&contents)
}

pub fn public_key_from_str(contents: &str) -> Result<DecodingKey, KeyError> {
    let contents = contents.trim();

    if contents.is_empty() {
        return Err(KeyError::Empty);
    }

    if contents.starts_with("-----BEGIN") {
        return Ok(DecodingKey::from_rsa_pem(contents.as_bytes())?);
    }

    Ok(DecodingKey::from_rsa_pem(armour(contents).as_bytes())?)
}

/// Wraps a bare base64 body in a `PUBLIC KEY` PEM envelope.
fn armour(body: &str) -> String {
    let body: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    let mut pem = String::with_capacity(body.len() + 64);

    pem.push_str(PEM_BEGIN);
    pem.push('\n');
    for line in body.as_bytes().chunks(PEM_LINE_WIDTH) {
        pem.push_str(&String::from_utf8_lossy(line));
        pem.push('\n');
    }
    pem.push_str(PEM_END);
    pem.push('\n');

    pem
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLIC_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../tests/fixtures/jwt_public.pem"
    ));
    const PUBLIC_B64: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../tests/fixtures/jwt_public.b64"
    ));

    #[test]
    fn test_pem_key() {
        assert!(public_key_from_str(PUBLIC_PEM).is_ok());
    }

    #[test]
    fn test_bare_base64_key() {
        assert!(public_key_from_str(PUBLIC_B64).is_ok());
    }

    #[test]
    fn test_armour_wraps_lines() {
        let pem = armour(&"A".repeat(100));
        let lines: Vec<&str> = pem.lines().collect();

        assert_eq!(lines.first(), Some(&PEM_BEGIN));
        assert_eq!(lines[1].len(), 64);
        assert_eq!(lines[2].len(), 36);
        assert_eq!(lines.last(), Some(&PEM_END));
    }

    #[test]
    fn test_empty_key() {
        assert!(matches!(public_key_from_str("  \n"), Err(KeyError::Empty)));
    }

    #[test]
    fn test_garbage_key() {
        assert!(matches!(
            public_key_from_str("-----BEGIN PUBLIC KEY-----\nnope\n-----END PUBLIC KEY-----"),
            Err(KeyError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_public_key(Path::new("/nonexistent/jwt_public.pem")),
            Err(KeyError::Io { .. })
        ));
    }
}

//! HTTP server settings.
//!
//! - `SERVER_ADDR`: Listen address (default: `0.0.0.0:3000`)
//! - `MAX_UPLOAD_SIZE`: Request body limit as a data size, e.g. `10MB` (default: `10MB`)
//! - `REQUEST_TIMEOUT_SECS`: Deadline for a request before it is abandoned (default: 30)

use std::env;
use std::time::Duration;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    /// Bytes
    pub max_upload_size: u64,
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            addr: env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),
            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|s| parse_data_size(&s))
                .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE),
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        }
    }
}

/// Parses `"10MB"`, `"512KB"`, `"1GB"` or a plain byte count. Units are
/// binary multiples and case-insensitive.
pub fn parse_data_size(value: &str) -> Option<u64> {
    let value = value.trim().to_ascii_uppercase();
    let digits_end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(digits_end);
    let number: u64 = number.parse().ok()?;

    let multiplier = match unit.trim() {
        "" | "B" => 1,
        "KB" => 1024,
        "MB" => 1024 * 1024,
        "GB" => 1024 * 1024 * 1024,
        _ => return None,
    };

    number.checked_mul(multiplier)
}

use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageConfig {
    /// Prefix of validation message keys
    pub namespace: String,
    /// Optional JSON file overlaying the bundled templates
    pub overrides_path: Option<PathBuf>,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            namespace: "doe".to_string(),
            overrides_path: None,
        }
    }
}

impl MessageConfig {
    pub fn from_env() -> Self {
        Self {
            namespace: env::var("MESSAGES_NAMESPACE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "doe".to_string()),
            overrides_path: env::var("MESSAGES_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MessageConfig::default();

        assert_eq!(config.namespace, "doe");
        assert!(config.overrides_path.is_none());
    }
}

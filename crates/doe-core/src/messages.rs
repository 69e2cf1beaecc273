//! Localized message templates.
//!
//! A [`MessageSource`] is an immutable key → template table. Templates use
//! positional placeholders (`{0}`, `{1}`, ...) filled from the lookup
//! arguments. The bundled table ships with the crate; deployments may overlay
//! it with a JSON file of their own.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

const BUNDLED_MESSAGES: &str = include_str!("../messages/messages.json");

#[derive(Debug, Error)]
pub enum MessageSourceError {
    #[error("failed to read message file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("message file is not a flat JSON object of strings: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct MessageSource {
    templates: HashMap<String, String>,
}

impl MessageSource {
    pub fn new(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }

    pub fn from_json(json: &str) -> Result<Self, MessageSourceError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// The table compiled into the binary.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_MESSAGES).unwrap_or_default()
    }

    /// Bundled templates, overlaid by the entries of `overrides` if given.
    pub fn load(overrides: Option<&Path>) -> Result<Self, MessageSourceError> {
        let mut source = Self::bundled();

        if let Some(path) = overrides {
            let json = std::fs::read_to_string(path).map_err(|source| MessageSourceError::Io {
                path: path.display().to_string(),
                source,
            })?;
            source.templates.extend(Self::from_json(&json)?.templates);
        }

        Ok(source)
    }

    pub fn get(&self, key: &str, args: &[&str]) -> Option<String> {
        self.templates
            .get(key)
            .map(|template| format_template(template, args))
    }

    pub fn resolve(&self, key: &str, args: &[&str], default: &str) -> String {
        self.get(key, args).unwrap_or_else(|| default.to_string())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Replaces `{n}` with the n-th argument. Placeholders without a matching
/// argument are left untouched.
fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let substituted = after.find('}').and_then(|end| {
            let index: usize = after[..end].trim().parse().ok()?;
            args.get(index).map(|arg| (end, *arg))
        });

        match substituted {
            Some((end, arg)) => {
                out.push_str(arg);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

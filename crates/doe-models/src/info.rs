//! Informational records.
//!
//! Public and secret records share one shape and differ only in the table
//! they are read from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InfoRecord {
    pub id: i32,
    pub contents: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl InfoRecord {
    /// Whether `contents` holds at least one non-whitespace character.
    pub fn has_text(&self) -> bool {
        self.contents
            .as_deref()
            .is_some_and(|c| c.chars().any(|ch| !ch.is_whitespace()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoTable {
    Public,
    Secret,
}

impl InfoTable {
    pub fn table_name(self) -> &'static str {
        match self {
            InfoTable::Public => "public_info",
            InfoTable::Secret => "secret_info",
        }
    }
}

//! # Doe Models
//!
//! Domain models for the Doe resource server.
//!
//! - [`info`]: Read-only informational records and the collections holding them

pub mod info;

pub use info::{InfoRecord, InfoTable};

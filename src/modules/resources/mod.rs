//! Read-only informational resources.
//!
//! - `GET /rest/v1/resource/public` requires `SCOPE_resource:read`
//! - `GET /rest/v1/resource/secret` requires `SCOPE_ADMIN`

pub mod controller;
pub mod router;
pub mod service;

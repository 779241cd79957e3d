//! HTTP service for docval
//!
//! Exposes a single endpoint (default `POST /api/v1/validate`) that accepts
//!
//! ```json
//! { "tests": [{ "name": "basic", "type": "preset" }], "document": { ... } }
//! ```
//!
//! and answers with a [`ValidationReport`](docval_core::ValidationReport).
//!
//! # Status codes
//!
//! - `200` with the report, whether or not the document is valid
//! - `400` for malformed bodies (unknown check or preset names included)
//! - `504` when the configured deadline expires
//! - `500` for internal failures

pub mod api;
pub mod boundary;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use api::{ApiError, AppState};
pub use boundary::RequestValidator;
pub use config::{ConfigLayer, ServerConfig};
pub use error::{Error, Result};
pub use server::{build_router, run};

//! Shared test utilities for the docval workspace.
//!
//! Provides fabricated checks with predictable behaviour and a small sample
//! catalog, so crate test suites can exercise resolution and execution
//! without depending on the real rule library. Dev-dependency only.
//!
//! # Modules
//!
//! - [`checks`]: fabricated [`DocumentCheck`](docval_core::DocumentCheck)s
//! - [`catalog`]: sample catalogs built from those checks
//! - [`fixtures`]: CSAF documents shared by the workspace test suites

pub mod catalog;
pub mod checks;
pub mod fixtures;

pub use catalog::{catalog_of, sample_catalog};
pub use fixtures::load_document;

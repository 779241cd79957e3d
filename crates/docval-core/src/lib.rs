//! Core orchestration for docval
//!
//! This crate decides *which* checks run against a document and *how* their
//! findings are reported. It never defines what a check looks for; checks are
//! opaque [`DocumentCheck`] implementations supplied by a rule library.
//!
//! # Architecture
//!
//! ```text
//!   selectors ──> Catalog::resolve ──> ResolvedCheckSet
//!                                            |
//!                                        Runner::run
//!                                            |
//!                                     Vec<CheckResult>
//!                                            |
//!                            ValidationReport::from_results
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use docval_core::{Catalog, CheckSource, FnCheck, Findings, Selector, Validator};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let has_title = FnCheck::new("has_title", |doc| {
//!     let mut findings = Findings::new();
//!     if doc.get("title").is_none() {
//!         findings.error("", "must have required property 'title'");
//!     }
//!     findings
//! });
//!
//! let catalog = Catalog::builder()
//!     .source(CheckSource::new("schema", vec![has_title.shared()]))
//!     .unwrap()
//!     .build();
//!
//! let validator = Validator::new(Arc::new(catalog));
//! let report = validator
//!     .validate(&[Selector::preset("schema")], Arc::new(serde_json::json!({})))
//!     .await
//!     .unwrap();
//! assert!(!report.is_valid);
//! # });
//! ```

pub mod check;
pub mod error;
pub mod registry;
pub mod report;
pub mod runner;
pub mod selector;
pub mod validator;

pub use check::{CheckFault, CheckOutcome, CheckRef, DocumentCheck, ErrorFinding, Finding, Findings, FnCheck};
pub use error::{Error, Result};
pub use registry::{Catalog, CatalogBuilder, CheckSource, Registration};
pub use report::{CheckResult, ValidationReport};
pub use runner::{ConcurrentRunner, ExecutionMode, Runner, SequentialRunner, execute_check};
pub use selector::{ResolvedCheckSet, Selector, SelectorKind};
pub use validator::{ValidationRequest, Validator};

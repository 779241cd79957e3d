//! Validation service
//!
//! Ties the pieces together: resolve selectors against the catalog, run the
//! resolved checks, aggregate the results.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::Catalog;
use crate::report::ValidationReport;
use crate::runner::{Runner, SequentialRunner};
use crate::selector::Selector;
use crate::{Error, Result};

/// A validated request: selectors plus the document to check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub tests: Vec<Selector>,
    pub document: Value,
}

/// Validates documents against a catalog.
///
/// Cheap to clone; the catalog and runner are shared.
#[derive(Clone)]
pub struct Validator {
    catalog: Arc<Catalog>,
    runner: Arc<dyn Runner>,
    deadline: Option<Duration>,
}

impl Validator {
    /// Create a validator that runs checks sequentially with no deadline.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            runner: Arc::new(SequentialRunner),
            deadline: None,
        }
    }

    /// Use a different runner.
    pub fn with_runner(mut self, runner: Arc<dyn Runner>) -> Self {
        self.runner = runner;
        self
    }

    /// Fail requests whose checks do not finish within `deadline`.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Validate a document against the given selectors.
    ///
    /// Either returns a complete report or fails as a whole; a partial
    /// report is never returned.
    pub async fn validate(
        &self,
        selectors: &[Selector],
        document: Arc<Value>,
    ) -> Result<ValidationReport> {
        let resolved = self.catalog.resolve(selectors);
        tracing::debug!(
            selectors = selectors.len(),
            resolved = ?resolved.names(),
            "Resolved selectors"
        );

        let started = Instant::now();
        let run = self.runner.run(&resolved, document);
        let results = match self.deadline {
            Some(deadline) => {
                let outcome = tokio::time::timeout(deadline, run).await;
                // A runner that blocks its task can finish after the timer
                // fired without being interrupted.
                if outcome.is_err() || started.elapsed() > deadline {
                    tracing::warn!(?deadline, "Validation deadline exceeded");
                    return Err(Error::DeadlineExceeded(deadline));
                }
                outcome.map_err(|_| Error::DeadlineExceeded(deadline))??
            }
            None => run.await?,
        };

        let report = ValidationReport::from_results(results);
        tracing::info!(
            checks = report.tests.len(),
            failed = report.failures().count(),
            is_valid = report.is_valid,
            "Validation finished"
        );
        Ok(report)
    }

    /// Convenience wrapper for an owned request.
    pub async fn validate_request(&self, request: ValidationRequest) -> Result<ValidationReport> {
        self.validate(&request.tests, Arc::new(request.document))
            .await
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("checks", &self.catalog.len())
            .field("deadline", &self.deadline)
            .finish()
    }
}

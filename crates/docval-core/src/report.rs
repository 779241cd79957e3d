//! Per-check results and the aggregated validation report

use serde::{Deserialize, Serialize};

use crate::check::{ErrorFinding, Finding, Findings};

/// Outcome of running one check against the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub name: String,
    pub is_valid: bool,
    pub errors: Vec<ErrorFinding>,
    pub warnings: Vec<Finding>,
    pub infos: Vec<Finding>,
}

impl CheckResult {
    /// Build a result from a check's findings.
    ///
    /// A check is valid when it reported no errors; warnings and infos do
    /// not affect validity.
    pub fn from_findings(name: impl Into<String>, findings: Findings) -> Self {
        Self {
            name: name.into(),
            is_valid: findings.errors.is_empty(),
            errors: findings.errors,
            warnings: findings.warnings,
            infos: findings.infos,
        }
    }

    /// Synthetic failing result for a check that faulted while running.
    pub fn faulted(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        let name = name.into();
        let message = format!("check '{}' failed to execute: {}", name, reason);
        Self {
            name,
            is_valid: false,
            errors: vec![ErrorFinding::new("", message)],
            warnings: vec![],
            infos: vec![],
        }
    }
}

/// Response returned for one validation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub tests: Vec<CheckResult>,
}

impl ValidationReport {
    /// Aggregate per-check results.
    ///
    /// The report is valid iff every result is valid. An empty result list
    /// is vacuously valid. Results are kept in the order given.
    pub fn from_results(tests: Vec<CheckResult>) -> Self {
        let is_valid = tests.iter().all(|t| t.is_valid);
        Self { is_valid, tests }
    }

    /// Names of the checks in report order.
    pub fn names(&self) -> Vec<&str> {
        self.tests.iter().map(|t| t.name.as_str()).collect()
    }

    /// Results that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.tests.iter().filter(|t| !t.is_valid)
    }
}

//! Core types for the check registry

use crate::check::CheckRef;

/// A named category of checks, e.g. "schema" or "mandatory".
///
/// Each source becomes a preset of the same name, and its checks are merged
/// into the check registry.
#[derive(Debug, Clone)]
pub struct CheckSource {
    pub name: String,
    pub checks: Vec<CheckRef>,
}

impl CheckSource {
    pub fn new(name: impl Into<String>, checks: Vec<CheckRef>) -> Self {
        Self {
            name: name.into(),
            checks,
        }
    }

    /// Check names in source order.
    pub fn names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }
}

/// A check in the registry together with the source that supplied it.
#[derive(Debug, Clone)]
pub struct Registration {
    pub check: CheckRef,
    pub source: String,
}

//! Selector resolution
//!
//! Turns a client-submitted list of selectors into the ordered,
//! deduplicated set of checks that will actually run.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::check::CheckRef;
use crate::registry::Catalog;

/// What a selector refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    /// A single check
    Test,
    /// A named bundle of checks
    Preset,
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Test => write!(f, "test"),
            Self::Preset => write!(f, "preset"),
        }
    }
}

/// Request to include one check or one preset by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SelectorKind,
}

impl Selector {
    pub fn test(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SelectorKind::Test,
        }
    }

    pub fn preset(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SelectorKind::Preset,
        }
    }
}

/// Ordered checks to execute, unique by name.
#[derive(Debug, Clone, Default)]
pub struct ResolvedCheckSet {
    checks: Vec<CheckRef>,
}

impl ResolvedCheckSet {
    /// Check names in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn checks(&self) -> &[CheckRef] {
        &self.checks
    }

    pub fn iter(&self) -> impl Iterator<Item = &CheckRef> {
        self.checks.iter()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl FromIterator<CheckRef> for ResolvedCheckSet {
    /// Collects checks, keeping only the first occurrence of each name.
    fn from_iter<I: IntoIterator<Item = CheckRef>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let checks = iter
            .into_iter()
            .filter(|check| seen.insert(check.name().to_string()))
            .collect();
        Self { checks }
    }
}

impl Catalog {
    /// Resolve selectors against this catalog.
    ///
    /// Presets expand in place. Unknown names contribute nothing. Duplicates
    /// are dropped, keeping the position of their first occurrence.
    pub fn resolve(&self, selectors: &[Selector]) -> ResolvedCheckSet {
        selectors
            .iter()
            .flat_map(|selector| self.expand(selector).iter().cloned())
            .collect()
    }

    fn expand(&self, selector: &Selector) -> &[CheckRef] {
        let found = match selector.kind {
            SelectorKind::Preset => self.lookup_preset(&selector.name),
            SelectorKind::Test => self.lookup_check(&selector.name).map(std::slice::from_ref),
        };
        found.unwrap_or_else(|| {
            tracing::debug!(
                name = %selector.name,
                kind = %selector.kind,
                "Ignoring unknown selector"
            );
            &[]
        })
    }
}

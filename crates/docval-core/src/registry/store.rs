//! Catalog storage and construction

use std::collections::{HashMap, HashSet};

use super::{CheckSource, Registration};
use crate::check::CheckRef;
use crate::{Error, Result};

/// Name-indexed access to checks and presets.
///
/// The check and preset namespaces are independent: a preset may share its
/// name with a check.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    checks: HashMap<String, Registration>,
    presets: HashMap<String, Vec<CheckRef>>,
}

impl Catalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Look up a single check by name.
    pub fn lookup_check(&self, name: &str) -> Option<&CheckRef> {
        self.checks.get(name).map(|r| &r.check)
    }

    /// Look up a preset's member checks, in preset order.
    pub fn lookup_preset(&self, name: &str) -> Option<&[CheckRef]> {
        self.presets.get(name).map(|p| p.as_slice())
    }

    /// Get the full registration for a check, including its source.
    pub fn registration(&self, name: &str) -> Option<&Registration> {
        self.checks.get(name)
    }

    pub fn has_check(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    pub fn has_preset(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// List all check names (sorted).
    pub fn check_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.checks.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// List all preset names (sorted).
    pub fn preset_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.presets.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Builder for [`Catalog`].
///
/// Sources are merged in the order they are added. When two sources supply a
/// check with the same name, the later source wins in the check registry;
/// the earlier source's preset keeps its own check.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category source and its preset of the same name.
    ///
    /// Fails if the source contains the same check name twice.
    pub fn source(mut self, source: CheckSource) -> Result<Self> {
        let mut seen = HashSet::new();
        for check in &source.checks {
            if !seen.insert(check.name()) {
                return Err(Error::DuplicateCheck {
                    source_name: source.name.clone(),
                    name: check.name().to_string(),
                });
            }
        }

        for check in &source.checks {
            let registration = Registration {
                check: check.clone(),
                source: source.name.clone(),
            };
            if let Some(previous) = self
                .catalog
                .checks
                .insert(check.name().to_string(), registration)
            {
                tracing::warn!(
                    check = check.name(),
                    shadowed = %previous.source,
                    winner = %source.name,
                    "Check registered by an earlier source was replaced"
                );
            }
        }

        tracing::debug!(source = %source.name, checks = source.checks.len(), "Registered source");
        self.insert_preset(source.name, source.checks);
        Ok(self)
    }

    /// Register a preset built by concatenating existing presets in order.
    pub fn combination(mut self, name: impl Into<String>, parts: &[&str]) -> Result<Self> {
        let name = name.into();
        let mut checks = Vec::new();
        for part in parts {
            let members = self
                .catalog
                .presets
                .get(*part)
                .ok_or_else(|| Error::UnknownPreset {
                    preset: name.clone(),
                    missing: part.to_string(),
                })?;
            checks.extend(members.iter().cloned());
        }
        self.insert_preset(name, checks);
        Ok(self)
    }

    fn insert_preset(&mut self, name: String, checks: Vec<CheckRef>) {
        if self.catalog.presets.insert(name.clone(), checks).is_some() {
            tracing::warn!(preset = %name, "Preset registered twice, keeping the latest");
        }
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}

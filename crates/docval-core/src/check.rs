//! DocumentCheck trait and finding types
//!
//! A check is an opaque, named function from a JSON document to a set of
//! findings. The core never looks inside a check; it only decides which
//! checks run and how their findings are reported.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shared handle to a registered check.
pub type CheckRef = Arc<dyn DocumentCheck>;

/// Outcome of running a check against a document.
pub type CheckOutcome = std::result::Result<Findings, CheckFault>;

/// A single named rule evaluated against a document.
///
/// Implementations must be pure with respect to the document: the same input
/// produces the same findings, and no state is shared between invocations.
pub trait DocumentCheck: Send + Sync {
    /// Unique name of the check within the registry.
    fn name(&self) -> &str;

    /// Evaluate the check.
    ///
    /// Returning `Err` signals a defect in the check itself (not in the
    /// document). The runner reports it as a failed result.
    fn check(&self, document: &Value) -> CheckOutcome;
}

impl fmt::Debug for dyn DocumentCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentCheck")
            .field("name", &self.name())
            .finish()
    }
}

/// Internal fault raised by a check implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CheckFault {
    pub message: String,
}

impl CheckFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error-level finding. The message is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorFinding {
    /// JSON pointer into the document (`""` is the root)
    pub instance_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorFinding {
    pub fn new(instance_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            instance_path: instance_path.into(),
            message: Some(message.into()),
        }
    }

    /// An error without a human-readable description.
    pub fn bare(instance_path: impl Into<String>) -> Self {
        Self {
            instance_path: instance_path.into(),
            message: None,
        }
    }
}

/// Warning or informational finding. The message is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub instance_path: String,
    pub message: String,
}

impl Finding {
    pub fn new(instance_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            instance_path: instance_path.into(),
            message: message.into(),
        }
    }
}

/// Findings produced by one check, split by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub errors: Vec<ErrorFinding>,
    pub warnings: Vec<Finding>,
    pub infos: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, instance_path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ErrorFinding::new(instance_path, message));
    }

    pub fn warning(&mut self, instance_path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Finding::new(instance_path, message));
    }

    pub fn info(&mut self, instance_path: impl Into<String>, message: impl Into<String>) {
        self.infos.push(Finding::new(instance_path, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.infos.is_empty()
    }
}

type CheckFn = dyn Fn(&Value) -> CheckOutcome + Send + Sync;

/// A check backed by a plain function or closure.
pub struct FnCheck {
    name: String,
    func: Box<CheckFn>,
}

impl FnCheck {
    /// Create a check from a function that cannot fault.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Findings + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(move |document| Ok(func(document))),
        }
    }

    /// Create a check from a function that may report an internal fault.
    pub fn fallible<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> CheckOutcome + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }

    /// Wrap into a shared handle.
    pub fn shared(self) -> CheckRef {
        Arc::new(self)
    }
}

impl DocumentCheck for FnCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, document: &Value) -> CheckOutcome {
        (self.func)(document)
    }
}

//! Validation runners
//!
//! A runner executes a resolved check set against one document and returns
//! one [`CheckResult`] per check, in the same order as the input.
//!
//! # Fault isolation
//!
//! A check that returns a [`CheckFault`](crate::check::CheckFault) or panics
//! never aborts the run. It is reported as a failing result with a single
//! error at the document root, and the remaining checks proceed.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::check::DocumentCheck;
use crate::report::CheckResult;
use crate::selector::ResolvedCheckSet;
use crate::{Error, Result};

/// Executes checks against a document.
#[async_trait]
pub trait Runner: Send + Sync {
    async fn run(
        &self,
        checks: &ResolvedCheckSet,
        document: Arc<Value>,
    ) -> Result<Vec<CheckResult>>;
}

/// Run a single check, converting faults and panics into a failing result.
pub fn execute_check(check: &dyn DocumentCheck, document: &Value) -> CheckResult {
    let name = check.name();
    match panic::catch_unwind(AssertUnwindSafe(|| check.check(document))) {
        Ok(Ok(findings)) => CheckResult::from_findings(name, findings),
        Ok(Err(fault)) => {
            tracing::warn!(check = name, error = %fault, "Check reported an internal fault");
            CheckResult::faulted(name, fault)
        }
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            tracing::warn!(check = name, error = %reason, "Check panicked");
            CheckResult::faulted(name, reason)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

/// Runs checks one after another on a single blocking worker.
///
/// Check bodies never run on the async executor, so a deadline around the
/// run fires on time even while a slow check is still executing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialRunner;

#[async_trait]
impl Runner for SequentialRunner {
    async fn run(
        &self,
        checks: &ResolvedCheckSet,
        document: Arc<Value>,
    ) -> Result<Vec<CheckResult>> {
        let checks = checks.clone();
        tokio::task::spawn_blocking(move || {
            checks
                .iter()
                .map(|check| execute_check(check.as_ref(), &document))
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|e| Error::Worker {
            message: e.to_string(),
        })
    }
}

/// Fans checks out onto blocking worker tasks.
///
/// At most `max_parallel` checks run at once. Results are reassembled in
/// input order, not completion order.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrentRunner {
    max_parallel: usize,
}

impl ConcurrentRunner {
    pub fn new(max_parallel: usize) -> Self {
        Self {
            max_parallel: max_parallel.max(1),
        }
    }

    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }
}

impl Default for ConcurrentRunner {
    fn default() -> Self {
        Self::new(default_parallelism())
    }
}

/// Number of worker threads the host can usefully run.
pub fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[async_trait]
impl Runner for ConcurrentRunner {
    async fn run(
        &self,
        checks: &ResolvedCheckSet,
        document: Arc<Value>,
    ) -> Result<Vec<CheckResult>> {
        let permits = Arc::new(Semaphore::new(self.max_parallel));
        let mut tasks = JoinSet::new();

        for (index, check) in checks.iter().cloned().enumerate() {
            let document = Arc::clone(&document);
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await.map_err(|e| Error::Worker {
                    message: e.to_string(),
                })?;
                let name = check.name().to_string();
                let result =
                    tokio::task::spawn_blocking(move || execute_check(check.as_ref(), &document))
                        .await
                        .unwrap_or_else(|e| CheckResult::faulted(name, e));
                Ok::<_, Error>((index, result))
            });
        }

        let mut slots: Vec<Option<CheckResult>> = vec![None; checks.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined.map_err(|e| Error::Worker {
                message: e.to_string(),
            })??;
            slots[index] = Some(result);
        }

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::Worker {
                message: "a check finished without producing a result".to_string(),
            })
    }
}

/// How checks within one request are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Sequential,
    #[default]
    Concurrent,
}

impl ExecutionMode {
    /// Build the runner for this mode.
    pub fn runner(self, max_parallel: usize) -> Arc<dyn Runner> {
        match self {
            Self::Sequential => Arc::new(SequentialRunner),
            Self::Concurrent => Arc::new(ConcurrentRunner::new(max_parallel)),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Concurrent => write!(f, "concurrent"),
        }
    }
}

impl std::str::FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(Self::Sequential),
            "concurrent" => Ok(Self::Concurrent),
            other => Err(format!(
                "unknown execution mode '{}' (expected 'sequential' or 'concurrent')",
                other
            )),
        }
    }
}

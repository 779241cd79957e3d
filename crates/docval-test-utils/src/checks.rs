//! Fabricated checks for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use docval_core::{CheckFault, CheckRef, DocumentCheck, Findings, FnCheck};
use serde_json::Value;

/// A check that never reports anything.
pub fn passing(name: &str) -> CheckRef {
    FnCheck::new(name, |_| Findings::new()).shared()
}

/// A check that always reports one error at `path`.
pub fn failing(name: &str, path: &str, message: &str) -> CheckRef {
    let path = path.to_string();
    let message = message.to_string();
    FnCheck::new(name, move |_| {
        let mut findings = Findings::new();
        findings.error(path.clone(), message.clone());
        findings
    })
    .shared()
}

/// A check that reports one warning and one info but no errors.
pub fn noisy(name: &str) -> CheckRef {
    FnCheck::new(name, |_| {
        let mut findings = Findings::new();
        findings.warning("/document", "looks suspicious");
        findings.info("", "for your information");
        findings
    })
    .shared()
}

/// A check that fails when the pointer `path` is missing from the document.
pub fn requires(name: &str, path: &str) -> CheckRef {
    let path = path.to_string();
    FnCheck::new(name, move |document: &Value| {
        let mut findings = Findings::new();
        if document.pointer(&path).is_none() {
            findings.error(path.clone(), "required value is missing");
        }
        findings
    })
    .shared()
}

/// A check that panics when run.
pub fn panicking(name: &str) -> CheckRef {
    FnCheck::new(name, |_| panic!("fabricated check failure")).shared()
}

/// A check that returns an internal fault.
pub fn faulting(name: &str) -> CheckRef {
    FnCheck::fallible(name, |_| Err(CheckFault::new("fabricated fault"))).shared()
}

/// A passing check that blocks its worker for `delay` first.
pub fn slow(name: &str, delay: Duration) -> CheckRef {
    FnCheck::new(name, move |_| {
        std::thread::sleep(delay);
        Findings::new()
    })
    .shared()
}

/// A passing check that counts how often it ran.
pub struct CountingCheck {
    name: String,
    calls: AtomicUsize,
}

impl CountingCheck {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentCheck for CountingCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, _document: &Value) -> docval_core::CheckOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Findings::new())
    }
}

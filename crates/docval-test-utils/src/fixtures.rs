//! Access to the CSAF documents under `test-fixtures/documents`

use std::path::PathBuf;

use serde_json::Value;

/// Path to the workspace `test-fixtures` directory.
pub fn fixtures_dir() -> PathBuf {
    // crates/docval-test-utils -> ../../test-fixtures
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures")
}

/// Load and parse `test-fixtures/documents/<name>.json`.
///
/// # Panics
///
/// Panics when the fixture is missing or is not valid JSON.
pub fn load_document(name: &str) -> Value {
    let path = fixtures_dir().join("documents").join(format!("{name}.json"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("Fixture {} is not valid JSON: {e}", path.display()))
}

//! End-to-end validation against the builtin catalog
//!
//! Exercises the complete flow: builtin catalog -> selector resolution ->
//! runner -> aggregated report, for both execution modes.

use std::sync::Arc;

use docval_core::{ExecutionMode, Selector, ValidationReport, Validator};
use docval_rules::builtin_catalog;
use docval_test_utils::load_document;
use pretty_assertions::assert_eq;
use rstest::rstest;

async fn validate(mode: ExecutionMode, selectors: &[Selector], fixture: &str) -> ValidationReport {
    let validator = Validator::new(Arc::new(builtin_catalog().unwrap()))
        .with_runner(mode.runner(4));
    validator
        .validate(selectors, Arc::new(load_document(fixture)))
        .await
        .unwrap()
}

#[rstest]
#[case(ExecutionMode::Sequential)]
#[case(ExecutionMode::Concurrent)]
#[tokio::test]
async fn test_valid_document_passes_every_preset(#[case] mode: ExecutionMode) {
    for preset in ["schema", "mandatory", "optional", "informative", "basic", "extended", "full"] {
        let report = validate(mode, &[Selector::preset(preset)], "valid").await;
        assert!(report.is_valid, "{mode}/{preset}: {report:?}");
        assert!(report.tests.iter().all(|t| t.warnings.is_empty() && t.infos.is_empty()));
    }
}

#[rstest]
#[case(ExecutionMode::Sequential)]
#[case(ExecutionMode::Concurrent)]
#[tokio::test]
async fn test_warnings_and_infos_do_not_invalidate(#[case] mode: ExecutionMode) {
    let report = validate(
        mode,
        &[Selector::preset("optional"), Selector::preset("informative")],
        "broken_references",
    )
    .await;

    assert!(report.is_valid);
    assert_eq!(
        report.names(),
        vec![
            "optionalTest_6_2_1",
            "optionalTest_6_2_10",
            "informativeTest_6_3_1",
            "informativeTest_6_3_2"
        ]
    );
    assert_eq!(report.tests[0].warnings.len(), 1);
    assert_eq!(report.tests[2].infos.len(), 1);
}

#[tokio::test]
async fn test_execution_modes_produce_identical_reports() {
    let selectors = [Selector::preset("full")];
    for fixture in ["valid", "broken_references", "not_csaf"] {
        let sequential = validate(ExecutionMode::Sequential, &selectors, fixture).await;
        let concurrent = validate(ExecutionMode::Concurrent, &selectors, fixture).await;
        assert_eq!(
            serde_json::to_string(&sequential).unwrap(),
            serde_json::to_string(&concurrent).unwrap(),
            "{fixture}"
        );
    }
}

#[tokio::test]
async fn test_single_test_selector_runs_only_that_check() {
    let report = validate(
        ExecutionMode::Concurrent,
        &[Selector::test("mandatoryTest_6_1_2")],
        "broken_references",
    )
    .await;

    assert!(!report.is_valid);
    assert_eq!(report.names(), vec!["mandatoryTest_6_1_2"]);
    assert_eq!(
        report.tests[0].errors[0].instance_path,
        "/product_tree/full_product_names/1/product_id"
    );
}

#[tokio::test]
async fn test_unknown_selectors_contribute_nothing() {
    let report = validate(
        ExecutionMode::Sequential,
        &[
            Selector::preset("minimal"),
            Selector::test("mandatoryTest_9_9_9"),
            Selector::test("csaf_2_0"),
        ],
        "not_csaf",
    )
    .await;

    assert_eq!(report.names(), vec!["csaf_2_0"]);
    assert!(!report.is_valid);
}

//! Builtin catalog shape and check behaviour on the fixture documents

use docval_core::{CheckResult, execute_check};
use docval_rules::{builtin_catalog, builtin_sources};
use docval_test_utils::load_document;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn run(check: &str, fixture: &str) -> CheckResult {
    let catalog = builtin_catalog().unwrap();
    let check = catalog
        .lookup_check(check)
        .unwrap_or_else(|| panic!("{check} is not registered"));
    execute_check(check.as_ref(), &load_document(fixture))
}

fn error_paths(result: &CheckResult) -> Vec<&str> {
    result.errors.iter().map(|e| e.instance_path.as_str()).collect()
}

fn warning_paths(result: &CheckResult) -> Vec<&str> {
    result.warnings.iter().map(|w| w.instance_path.as_str()).collect()
}

fn info_paths(result: &CheckResult) -> Vec<&str> {
    result.infos.iter().map(|i| i.instance_path.as_str()).collect()
}

#[test]
fn test_category_presets_follow_source_order() {
    let catalog = builtin_catalog().unwrap();
    let names = |preset: &str| -> Vec<String> {
        catalog
            .lookup_preset(preset)
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    };

    assert_eq!(names("schema"), vec!["csaf_2_0"]);
    assert_eq!(
        names("mandatory"),
        vec![
            "mandatoryTest_6_1_1",
            "mandatoryTest_6_1_2",
            "mandatoryTest_6_1_4",
            "mandatoryTest_6_1_16"
        ]
    );
    assert_eq!(names("optional"), vec!["optionalTest_6_2_1", "optionalTest_6_2_10"]);
    assert_eq!(
        names("informative"),
        vec!["informativeTest_6_3_1", "informativeTest_6_3_2"]
    );
}

#[test]
fn test_combinations_are_nested_supersets() {
    let catalog = builtin_catalog().unwrap();
    let len = |preset: &str| catalog.lookup_preset(preset).unwrap().len();

    assert_eq!(len("basic"), len("schema") + len("mandatory"));
    assert_eq!(len("extended"), len("basic") + len("optional"));
    assert_eq!(len("full"), len("extended") + len("informative"));
    assert_eq!(len("full"), catalog.len());
    assert!(!catalog.has_preset("minimal"));
}

#[test]
fn test_sources_have_unique_names() {
    let sources = builtin_sources();
    let mut names: Vec<&str> = sources.iter().flat_map(|s| s.names()).collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[rstest]
#[case("csaf_2_0")]
#[case("mandatoryTest_6_1_1")]
#[case("mandatoryTest_6_1_2")]
#[case("mandatoryTest_6_1_4")]
#[case("mandatoryTest_6_1_16")]
#[case("optionalTest_6_2_1")]
#[case("optionalTest_6_2_10")]
#[case("informativeTest_6_3_1")]
#[case("informativeTest_6_3_2")]
fn test_valid_document_has_no_findings(#[case] check: &str) {
    let result = run(check, "valid");
    assert!(result.is_valid, "{result:?}");
    assert!(result.warnings.is_empty(), "{result:?}");
    assert!(result.infos.is_empty(), "{result:?}");
}

#[test]
fn test_broken_references_are_located() {
    let missing = run("mandatoryTest_6_1_1", "broken_references");
    assert_eq!(
        error_paths(&missing),
        vec!["/vulnerabilities/0/product_status/known_affected/1"]
    );

    let duplicate = run("mandatoryTest_6_1_2", "broken_references");
    assert_eq!(
        error_paths(&duplicate),
        vec!["/product_tree/full_product_names/1/product_id"]
    );

    let group = run("mandatoryTest_6_1_4", "broken_references");
    assert_eq!(
        error_paths(&group),
        vec!["/vulnerabilities/0/threats/0/group_ids/0"]
    );

    assert!(run("mandatoryTest_6_1_16", "broken_references").is_valid);
}

#[test]
fn test_optional_and_informative_findings_never_fail() {
    let unused = run("optionalTest_6_2_1", "broken_references");
    assert!(unused.is_valid);
    assert_eq!(
        warning_paths(&unused),
        vec!["/product_tree/full_product_names/2/product_id"]
    );

    let tlp = run("optionalTest_6_2_10", "broken_references");
    assert!(tlp.is_valid);
    assert_eq!(
        warning_paths(&tlp),
        vec!["/document/distribution"]
    );

    let v2 = run("informativeTest_6_3_1", "broken_references");
    assert!(v2.is_valid);
    assert_eq!(
        info_paths(&v2),
        vec!["/vulnerabilities/0/scores/0"]
    );

    let v30 = run("informativeTest_6_3_2", "broken_references");
    assert_eq!(
        info_paths(&v30),
        vec!["/vulnerabilities/0/scores/1/cvss_v3/version"]
    );
}

#[test]
fn test_schema_rejects_foreign_json() {
    let result = run("csaf_2_0", "not_csaf");
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].instance_path, "");
    assert_eq!(
        result.errors[0].message.as_deref(),
        Some("must have required property 'document'")
    );
}

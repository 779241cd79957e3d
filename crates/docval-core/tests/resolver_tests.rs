//! Selector resolution against the sample catalog

use docval_core::Selector;
use docval_test_utils::sample_catalog;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn preset(name: &str) -> Selector {
    Selector::preset(name)
}

fn test(name: &str) -> Selector {
    Selector::test(name)
}

#[rstest]
#[case::preset_then_member(vec![preset("schema"), test("X")], vec!["A", "X", "B"])]
#[case::member_then_preset(vec![test("X"), preset("schema")], vec!["X", "A", "B"])]
#[case::same_test_twice(vec![test("M1"), test("M1")], vec!["M1"])]
#[case::nested_combinations(
    vec![preset("basic"), preset("extended")],
    vec!["A", "X", "B", "M1", "M2", "O1"]
)]
#[case::category_after_combination(
    vec![preset("optional"), preset("basic"), preset("schema")],
    vec!["O1", "A", "X", "B", "M1", "M2"]
)]
#[case::unknown_preset(vec![preset("minimal"), test("B")], vec!["B"])]
#[case::unknown_test(vec![test("Z"), test("A")], vec!["A"])]
#[case::empty(vec![], vec![])]
fn test_resolution_order(#[case] selectors: Vec<Selector>, #[case] expected: Vec<&str>) {
    let catalog = sample_catalog();
    let resolved = catalog.resolve(&selectors);
    assert_eq!(resolved.names(), expected);
}

#[test]
fn test_full_preset_contains_every_check_once() {
    let catalog = sample_catalog();
    let resolved = catalog.resolve(&[preset("full"), preset("schema"), preset("informative")]);

    let mut names = resolved.names();
    assert_eq!(names.len(), catalog.len());
    names.sort();
    assert_eq!(names, catalog.check_names());
}

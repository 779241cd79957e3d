//! Request body validation
//!
//! Checks the raw JSON body before anything reaches the validator. The
//! allowed selector names come from the catalog, so a request can only name
//! checks and presets that actually exist. Messages use Ajv's wording with a
//! `body` prefix, e.g. `body/tests/0/name must be equal to one of the allowed
//! values`.

use std::collections::BTreeSet;

use docval_core::{Catalog, Selector, ValidationRequest};
use serde_json::{Map, Value};

/// Validates request bodies against the names known to a catalog.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    tests: BTreeSet<String>,
    presets: BTreeSet<String>,
}

impl RequestValidator {
    /// Build from a fully constructed catalog.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            tests: catalog.check_names().into_iter().map(String::from).collect(),
            presets: catalog.preset_names().into_iter().map(String::from).collect(),
        }
    }

    /// Validate a body, returning the typed request or every violation found.
    pub fn validate(&self, body: Value) -> Result<ValidationRequest, Vec<String>> {
        let Value::Object(mut body) = body else {
            return Err(vec!["body must be object".to_string()]);
        };

        let mut messages = Vec::new();
        for key in ["document", "tests"] {
            if !body.contains_key(key) {
                messages.push(format!("body must have required property '{key}'"));
            }
        }

        let mut tests = Vec::new();
        match body.get("tests") {
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    match self.selector(item, &format!("body/tests/{i}")) {
                        Ok(selector) => tests.push(selector),
                        Err(message) => messages.push(message),
                    }
                }
            }
            Some(_) => messages.push("body/tests must be array".to_string()),
            None => {}
        }

        if let Some(document) = body.get("document") {
            if !document.is_object() {
                messages.push("body/document must be object".to_string());
            }
        }

        if !messages.is_empty() {
            return Err(messages);
        }

        let document = body.remove("document").unwrap_or(Value::Null);
        Ok(ValidationRequest { tests, document })
    }

    fn selector(&self, item: &Value, path: &str) -> Result<Selector, String> {
        let Some(item) = item.as_object() else {
            return Err(format!("{path} must be object"));
        };
        let name = string_property(item, "name", path)?;
        let kind = string_property(item, "type", path)?;

        let (allowed, selector) = match kind {
            "test" => (&self.tests, Selector::test(name)),
            "preset" => (&self.presets, Selector::preset(name)),
            _ => return Err(format!("{path}/type must be equal to one of the allowed values")),
        };
        if !allowed.contains(name) {
            return Err(format!("{path}/name must be equal to one of the allowed values"));
        }
        Ok(selector)
    }
}

fn string_property<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a str, String> {
    match object.get(key) {
        None => Err(format!("{path} must have required property '{key}'")),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(format!("{path}/{key} must be string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docval_test_utils::sample_catalog;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn validator() -> RequestValidator {
        RequestValidator::new(&sample_catalog())
    }

    #[test]
    fn test_valid_request_is_typed() {
        let request = validator()
            .validate(json!({
                "tests": [{ "name": "schema", "type": "preset" }, { "name": "X", "type": "test" }],
                "document": { "document": {} }
            }))
            .unwrap();

        assert_eq!(
            request.tests,
            vec![Selector::preset("schema"), Selector::test("X")]
        );
        assert_eq!(request.document, json!({ "document": {} }));
    }

    #[test]
    fn test_empty_tests_are_accepted() {
        let request = validator()
            .validate(json!({ "tests": [], "document": {} }))
            .unwrap();
        assert!(request.tests.is_empty());
    }

    #[rstest]
    #[case::not_an_object(json!([]), vec!["body must be object"])]
    #[case::missing_everything(
        json!({}),
        vec!["body must have required property 'document'", "body must have required property 'tests'"]
    )]
    #[case::tests_not_array(json!({ "tests": {}, "document": {} }), vec!["body/tests must be array"])]
    #[case::document_not_object(json!({ "tests": [], "document": "csaf" }), vec!["body/document must be object"])]
    #[case::unknown_test(
        json!({ "tests": [{ "name": "Z", "type": "test" }], "document": {} }),
        vec!["body/tests/0/name must be equal to one of the allowed values"]
    )]
    #[case::preset_name_used_as_test(
        json!({ "tests": [{ "name": "X", "type": "test" }, { "name": "basic", "type": "test" }], "document": {} }),
        vec!["body/tests/1/name must be equal to one of the allowed values"]
    )]
    #[case::unknown_type(
        json!({ "tests": [{ "name": "A", "type": "rule" }], "document": {} }),
        vec!["body/tests/0/type must be equal to one of the allowed values"]
    )]
    #[case::missing_type(
        json!({ "tests": [{ "name": "A" }], "document": {} }),
        vec!["body/tests/0 must have required property 'type'"]
    )]
    #[case::name_not_string(
        json!({ "tests": [{ "name": 7, "type": "test" }], "document": {} }),
        vec!["body/tests/0/name must be string"]
    )]
    fn test_invalid_bodies(#[case] body: Value, #[case] expected: Vec<&str>) {
        let messages = validator().validate(body).unwrap_err();
        assert_eq!(messages, expected);
    }
}

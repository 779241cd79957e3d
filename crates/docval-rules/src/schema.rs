//! Structural schema check (`csaf_2_0`)
//!
//! A small declarative shape language covering the parts of the CSAF 2.0
//! JSON schema the other checks rely on. Messages follow Ajv's wording so
//! clients that already parse the upstream validator output keep working.

use chrono::DateTime;
use docval_core::{CheckOutcome, DocumentCheck, Findings};
use serde_json::{Map, Value};

use crate::pointer::Pointer;

/// Expected shape of a JSON value.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Anything is accepted.
    Any,
    String {
        allowed: Option<&'static [&'static str]>,
        min_length: usize,
    },
    /// An RFC 3339 timestamp (`format: date-time`).
    DateTime,
    Array {
        items: Box<Shape>,
        min_items: usize,
    },
    Object {
        required: &'static [&'static str],
        properties: Vec<(&'static str, Shape)>,
    },
}

impl Shape {
    fn non_empty_string() -> Self {
        Shape::String {
            allowed: None,
            min_length: 1,
        }
    }

    fn one_of(allowed: &'static [&'static str]) -> Self {
        Shape::String {
            allowed: Some(allowed),
            min_length: 0,
        }
    }

    fn array(items: Shape, min_items: usize) -> Self {
        Shape::Array {
            items: Box::new(items),
            min_items,
        }
    }

    fn object(required: &'static [&'static str], properties: Vec<(&'static str, Shape)>) -> Self {
        Shape::Object {
            required,
            properties,
        }
    }

    /// Check `value` against this shape, appending violations to `findings`.
    pub fn evaluate(&self, value: &Value, path: &Pointer, findings: &mut Findings) {
        match self {
            Shape::Any => {}
            Shape::String {
                allowed,
                min_length,
            } => {
                let Some(text) = value.as_str() else {
                    findings.error(path, "must be string");
                    return;
                };
                if text.chars().count() < *min_length {
                    findings.error(
                        path,
                        format!("must NOT have fewer than {min_length} characters"),
                    );
                }
                if let Some(allowed) = allowed {
                    if !allowed.iter().any(|candidate| *candidate == text) {
                        findings.error(path, "must be equal to one of the allowed values");
                    }
                }
            }
            Shape::DateTime => {
                let Some(text) = value.as_str() else {
                    findings.error(path, "must be string");
                    return;
                };
                if DateTime::parse_from_rfc3339(text).is_err() {
                    findings.error(path, "must match format \"date-time\"");
                }
            }
            Shape::Array { items, min_items } => {
                let Some(elements) = value.as_array() else {
                    findings.error(path, "must be array");
                    return;
                };
                if elements.len() < *min_items {
                    findings.error(path, format!("must NOT have fewer than {min_items} items"));
                }
                for (i, element) in elements.iter().enumerate() {
                    items.evaluate(element, &path.index(i), findings);
                }
            }
            Shape::Object {
                required,
                properties,
            } => {
                let Some(object) = value.as_object() else {
                    findings.error(path, "must be object");
                    return;
                };
                evaluate_object(object, required, properties, path, findings);
            }
        }
    }
}

fn evaluate_object(
    object: &Map<String, Value>,
    required: &[&str],
    properties: &[(&str, Shape)],
    path: &Pointer,
    findings: &mut Findings,
) {
    for key in required {
        if !object.contains_key(*key) {
            findings.error(path, format!("must have required property '{key}'"));
        }
    }
    for (key, shape) in properties {
        if let Some(child) = object.get(*key) {
            shape.evaluate(child, &path.key(key), findings);
        }
    }
}

const PUBLISHER_CATEGORIES: &[&str] = &[
    "coordinator",
    "discoverer",
    "other",
    "translator",
    "user",
    "vendor",
];
const TRACKING_STATUSES: &[&str] = &["draft", "final", "interim"];
const TLP_LABELS: &[&str] = &["AMBER", "GREEN", "RED", "WHITE"];

/// Shape of a CSAF 2.0 document.
pub fn csaf_document() -> Shape {
    let publisher = Shape::object(
        &["category", "name", "namespace"],
        vec![
            ("category", Shape::one_of(PUBLISHER_CATEGORIES)),
            ("name", Shape::non_empty_string()),
            ("namespace", Shape::non_empty_string()),
        ],
    );

    let revision = Shape::object(
        &["date", "number", "summary"],
        vec![
            ("date", Shape::DateTime),
            ("number", Shape::non_empty_string()),
            ("summary", Shape::non_empty_string()),
        ],
    );

    let tracking = Shape::object(
        &[
            "current_release_date",
            "id",
            "initial_release_date",
            "revision_history",
            "status",
            "version",
        ],
        vec![
            ("current_release_date", Shape::DateTime),
            ("id", Shape::non_empty_string()),
            ("initial_release_date", Shape::DateTime),
            ("revision_history", Shape::array(revision, 1)),
            ("status", Shape::one_of(TRACKING_STATUSES)),
            ("version", Shape::non_empty_string()),
        ],
    );

    let distribution = Shape::object(
        &[],
        vec![(
            "tlp",
            Shape::object(&["label"], vec![("label", Shape::one_of(TLP_LABELS))]),
        )],
    );

    let document = Shape::object(
        &["category", "csaf_version", "publisher", "title", "tracking"],
        vec![
            ("category", Shape::non_empty_string()),
            ("csaf_version", Shape::one_of(&["2.0"])),
            ("distribution", distribution),
            ("publisher", publisher),
            ("title", Shape::non_empty_string()),
            ("tracking", tracking),
        ],
    );

    let full_product_name = Shape::object(
        &["name", "product_id"],
        vec![
            ("name", Shape::non_empty_string()),
            ("product_id", Shape::non_empty_string()),
        ],
    );

    let product_group = Shape::object(
        &["group_id", "product_ids"],
        vec![
            ("group_id", Shape::non_empty_string()),
            ("product_ids", Shape::array(Shape::non_empty_string(), 2)),
        ],
    );

    let product_tree = Shape::object(
        &[],
        vec![
            ("branches", Shape::array(Shape::Any, 1)),
            ("full_product_names", Shape::array(full_product_name, 1)),
            ("product_groups", Shape::array(product_group, 1)),
            ("relationships", Shape::array(Shape::Any, 1)),
        ],
    );

    Shape::object(
        &["document"],
        vec![
            ("document", document),
            ("product_tree", product_tree),
            ("vulnerabilities", Shape::array(Shape::object(&[], vec![]), 1)),
        ],
    )
}

/// The `csaf_2_0` schema check.
pub struct SchemaCheck {
    name: &'static str,
    shape: Shape,
}

impl SchemaCheck {
    pub fn csaf_2_0() -> Self {
        Self {
            name: "csaf_2_0",
            shape: csaf_document(),
        }
    }
}

impl DocumentCheck for SchemaCheck {
    fn name(&self) -> &str {
        self.name
    }

    fn check(&self, document: &Value) -> CheckOutcome {
        let mut findings = Findings::new();
        self.shape.evaluate(document, &Pointer::root(), &mut findings);
        Ok(findings)
    }
}

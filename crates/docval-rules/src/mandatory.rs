//! Mandatory checks (CSAF 2.0 section 6.1)

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use docval_core::{CheckRef, FnCheck, Findings};
use serde_json::Value;

use crate::pointer::Pointer;
use crate::product::{self, array};

pub const MISSING_PRODUCT_ID: &str = "mandatoryTest_6_1_1";
pub const MULTIPLE_PRODUCT_ID: &str = "mandatoryTest_6_1_2";
pub const MISSING_GROUP_ID: &str = "mandatoryTest_6_1_4";
pub const LATEST_VERSION: &str = "mandatoryTest_6_1_16";

/// Checks in registration order.
pub fn checks() -> Vec<CheckRef> {
    vec![
        FnCheck::new(MISSING_PRODUCT_ID, missing_product_id_definition).shared(),
        FnCheck::new(MULTIPLE_PRODUCT_ID, multiple_product_id_definitions).shared(),
        FnCheck::new(MISSING_GROUP_ID, missing_group_id_definition).shared(),
        FnCheck::new(LATEST_VERSION, latest_document_version).shared(),
    ]
}

/// 6.1.1: every referenced product id is defined in the product tree.
pub fn missing_product_id_definition(document: &Value) -> Findings {
    let defined: HashSet<String> = product::definitions(document)
        .into_iter()
        .map(|o| o.id)
        .collect();

    let mut findings = Findings::new();
    for reference in product::references(document) {
        if !defined.contains(&reference.id) {
            findings.error(&reference.path, "definition of product id missing");
        }
    }
    findings
}

/// 6.1.2: a product id is defined at most once.
pub fn multiple_product_id_definitions(document: &Value) -> Findings {
    let mut seen = HashSet::new();
    let mut findings = Findings::new();
    for definition in product::definitions(document) {
        if !seen.insert(definition.id.clone()) {
            findings.error(&definition.path, "product id was already defined");
        }
    }
    findings
}

/// 6.1.4: every referenced product group id is defined.
pub fn missing_group_id_definition(document: &Value) -> Findings {
    let defined: HashSet<String> = product::group_definitions(document)
        .into_iter()
        .map(|o| o.id)
        .collect();

    let mut findings = Findings::new();
    for reference in product::group_references(document) {
        if !defined.contains(&reference.id) {
            findings.error(&reference.path, "definition of product group id missing");
        }
    }
    findings
}

/// A document version in either integer or semantic versioning.
#[derive(Debug, Clone, PartialEq, Eq)]
enum VersionNumber {
    Integer(u64),
    Semantic(semver::Version),
}

impl VersionNumber {
    fn parse(text: &str) -> Option<Self> {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            return text.parse().ok().map(Self::Integer);
        }
        semver::Version::parse(text).ok().map(Self::Semantic)
    }

    fn without_pre_release(&self) -> Self {
        match self {
            Self::Semantic(version) if !version.pre.is_empty() => {
                let mut version = version.clone();
                version.pre = semver::Prerelease::EMPTY;
                Self::Semantic(version)
            }
            other => other.clone(),
        }
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Semantic(a), Self::Semantic(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// 6.1.16: the document version equals the number of the newest revision.
///
/// The newest revision is the one with the latest date, ties broken by the
/// higher number. Dates are RFC 3339 timestamps compared as instants, so
/// differing UTC offsets order correctly. In draft documents a pre-release
/// part of the document version is ignored.
pub fn latest_document_version(document: &Value) -> Findings {
    let mut findings = Findings::new();
    let Some(tracking) = document.get("document").and_then(|d| d.get("tracking")) else {
        return findings;
    };
    let Some(version) = tracking
        .get("version")
        .and_then(Value::as_str)
        .and_then(VersionNumber::parse)
    else {
        return findings;
    };

    let mut revisions = Vec::new();
    for (_, revision) in array(tracking, "revision_history") {
        let date = revision
            .get("date")
            .and_then(Value::as_str)
            .and_then(|date| DateTime::parse_from_rfc3339(date).ok());
        let number = revision
            .get("number")
            .and_then(Value::as_str)
            .and_then(VersionNumber::parse);
        match (date, number) {
            (Some(date), Some(number)) => revisions.push((date, number)),
            // Malformed dates and numbers are reported by the schema check
            _ => return findings,
        }
    }

    let mut newest: Option<&(DateTime<FixedOffset>, VersionNumber)> = None;
    for candidate in &revisions {
        newest = match newest {
            None => Some(candidate),
            Some(current) => match candidate.0.cmp(&current.0) {
                Ordering::Greater => Some(candidate),
                Ordering::Less => Some(current),
                Ordering::Equal => match candidate.1.compare(&current.1) {
                    Some(Ordering::Greater) => Some(candidate),
                    Some(_) => Some(current),
                    // Mixed versioning schemes cannot be ordered
                    None => return findings,
                },
            },
        };
    }
    let Some((_, latest)) = newest else {
        return findings;
    };

    let is_draft = tracking.get("status").and_then(Value::as_str) == Some("draft");
    let expected = if is_draft {
        version.without_pre_release()
    } else {
        version
    };

    if expected != *latest {
        let path = Pointer::root().key("document").key("tracking").key("version");
        findings.error(
            &path,
            "the version was not equal to the number of the newest item of the revision history",
        );
    }
    findings
}

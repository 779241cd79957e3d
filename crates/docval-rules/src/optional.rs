//! Optional checks (CSAF 2.0 section 6.2). These only produce warnings.

use std::collections::HashSet;

use docval_core::{CheckRef, FnCheck, Findings};
use serde_json::Value;

use crate::pointer::Pointer;
use crate::product;

pub const UNUSED_PRODUCT_ID: &str = "optionalTest_6_2_1";
pub const MISSING_TLP_LABEL: &str = "optionalTest_6_2_10";

pub fn checks() -> Vec<CheckRef> {
    vec![
        FnCheck::new(UNUSED_PRODUCT_ID, unused_product_id_definition).shared(),
        FnCheck::new(MISSING_TLP_LABEL, missing_tlp_label).shared(),
    ]
}

/// 6.2.1: every defined product id is referenced somewhere.
pub fn unused_product_id_definition(document: &Value) -> Findings {
    let referenced: HashSet<String> = product::references(document)
        .into_iter()
        .map(|o| o.id)
        .collect();

    let mut findings = Findings::new();
    for definition in product::definitions(document) {
        if !referenced.contains(&definition.id) {
            findings.warning(&definition.path, "product is not referenced");
        }
    }
    findings
}

/// 6.2.10: the distribution section carries a TLP label.
pub fn missing_tlp_label(document: &Value) -> Findings {
    let mut findings = Findings::new();
    let Some(meta) = document.get("document") else {
        return findings;
    };

    let label = meta
        .get("distribution")
        .and_then(|d| d.get("tlp"))
        .and_then(|t| t.get("label"));
    if label.is_none() {
        let path = Pointer::root().key("document").key("distribution");
        findings.warning(&path, "the TLP label is missing");
    }
    findings
}

//! Informative checks (CSAF 2.0 section 6.3)

use docval_core::{CheckRef, FnCheck, Findings};
use serde_json::Value;

use crate::pointer::Pointer;
use crate::product::array;

pub const CVSS_V2_ONLY: &str = "informativeTest_6_3_1";
pub const CVSS_V3_0: &str = "informativeTest_6_3_2";

pub fn checks() -> Vec<CheckRef> {
    vec![
        FnCheck::new(CVSS_V2_ONLY, cvss_v2_only).shared(),
        FnCheck::new(CVSS_V3_0, cvss_v3_0).shared(),
    ]
}

fn for_each_score(document: &Value, mut visit: impl FnMut(&Value, Pointer)) {
    for (v, vulnerability) in array(document, "vulnerabilities") {
        for (s, score) in array(vulnerability, "scores") {
            let path = Pointer::root()
                .key("vulnerabilities")
                .index(v)
                .key("scores")
                .index(s);
            visit(score, path);
        }
    }
}

/// 6.3.1: scores use CVSS v2 as their only scoring system.
pub fn cvss_v2_only(document: &Value) -> Findings {
    let mut findings = Findings::new();
    for_each_score(document, |score, path| {
        if score.get("cvss_v2").is_some() && score.get("cvss_v3").is_none() {
            findings.info(&path, "CVSS v2 is used as the only scoring system");
        }
    });
    findings
}

/// 6.3.2: scores still use CVSS v3.0 rather than v3.1.
pub fn cvss_v3_0(document: &Value) -> Findings {
    let mut findings = Findings::new();
    for_each_score(document, |score, path| {
        let version = score
            .get("cvss_v3")
            .and_then(|cvss| cvss.get("version"))
            .and_then(Value::as_str);
        if version == Some("3.0") {
            findings.info(path.key("cvss_v3").key("version"), "CVSS v3.0 is used");
        }
    });
    findings
}

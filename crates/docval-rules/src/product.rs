//! Product and product group id collection
//!
//! Walks the product tree and the vulnerabilities section and records every
//! place a product id (or group id) is defined or referenced, together with
//! its JSON pointer.

use serde_json::Value;

use crate::pointer::Pointer;

/// One id occurrence in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub id: String,
    pub path: Pointer,
}

/// Product status lists that reference product ids.
const PRODUCT_STATUS_KEYS: &[&str] = &[
    "first_affected",
    "first_fixed",
    "fixed",
    "known_affected",
    "known_not_affected",
    "last_affected",
    "recommended",
    "under_investigation",
];

/// Vulnerability sections with `product_ids` / `group_ids` arrays.
const ID_LIST_SECTIONS: &[&str] = &["flags", "remediations", "threats"];

/// Every product id definition, in document order.
pub fn definitions(document: &Value) -> Vec<Occurrence> {
    let mut found = Vec::new();
    let tree_path = Pointer::root().key("product_tree");
    let Some(tree) = document.get("product_tree") else {
        return found;
    };

    if let Some(branches) = tree.get("branches").and_then(Value::as_array) {
        collect_branches(branches, &tree_path.key("branches"), &mut found);
    }

    for (i, name) in array(tree, "full_product_names") {
        let path = tree_path.key("full_product_names").index(i).key("product_id");
        push_str(name.get("product_id"), path, &mut found);
    }

    for (i, relationship) in array(tree, "relationships") {
        let path = tree_path
            .key("relationships")
            .index(i)
            .key("full_product_name")
            .key("product_id");
        push_str(
            relationship
                .get("full_product_name")
                .and_then(|n| n.get("product_id")),
            path,
            &mut found,
        );
    }

    found
}

fn collect_branches(branches: &[Value], path: &Pointer, found: &mut Vec<Occurrence>) {
    for (i, branch) in branches.iter().enumerate() {
        let branch_path = path.index(i);
        if let Some(product) = branch.get("product") {
            push_str(
                product.get("product_id"),
                branch_path.key("product").key("product_id"),
                found,
            );
        }
        if let Some(children) = branch.get("branches").and_then(Value::as_array) {
            collect_branches(children, &branch_path.key("branches"), found);
        }
    }
}

/// Every product id reference, in document order.
pub fn references(document: &Value) -> Vec<Occurrence> {
    let mut found = Vec::new();

    if let Some(tree) = document.get("product_tree") {
        let tree_path = Pointer::root().key("product_tree");
        for (i, group) in array(tree, "product_groups") {
            let path = tree_path.key("product_groups").index(i).key("product_ids");
            push_strings(group.get("product_ids"), &path, &mut found);
        }
        for (i, relationship) in array(tree, "relationships") {
            let path = tree_path.key("relationships").index(i);
            for key in ["product_reference", "relates_to_product_reference"] {
                push_str(relationship.get(key), path.key(key), &mut found);
            }
        }
    }

    for (v, vulnerability) in array(document, "vulnerabilities") {
        let vuln_path = Pointer::root().key("vulnerabilities").index(v);

        if let Some(status) = vulnerability.get("product_status") {
            for key in PRODUCT_STATUS_KEYS {
                let path = vuln_path.key("product_status").key(key);
                push_strings(status.get(*key), &path, &mut found);
            }
        }

        for section in ID_LIST_SECTIONS {
            for (i, entry) in array(vulnerability, section) {
                let path = vuln_path.key(section).index(i).key("product_ids");
                push_strings(entry.get("product_ids"), &path, &mut found);
            }
        }

        for (i, score) in array(vulnerability, "scores") {
            let path = vuln_path.key("scores").index(i).key("products");
            push_strings(score.get("products"), &path, &mut found);
        }
    }

    found
}

/// Every product group id definition.
pub fn group_definitions(document: &Value) -> Vec<Occurrence> {
    let mut found = Vec::new();
    if let Some(tree) = document.get("product_tree") {
        for (i, group) in array(tree, "product_groups") {
            let path = Pointer::root()
                .key("product_tree")
                .key("product_groups")
                .index(i)
                .key("group_id");
            push_str(group.get("group_id"), path, &mut found);
        }
    }
    found
}

/// Every product group id reference.
pub fn group_references(document: &Value) -> Vec<Occurrence> {
    let mut found = Vec::new();
    for (v, vulnerability) in array(document, "vulnerabilities") {
        let vuln_path = Pointer::root().key("vulnerabilities").index(v);
        for section in ID_LIST_SECTIONS {
            for (i, entry) in array(vulnerability, section) {
                let path = vuln_path.key(section).index(i).key("group_ids");
                push_strings(entry.get("group_ids"), &path, &mut found);
            }
        }
    }
    found
}

/// Enumerate `value[key]` when it is an array; yields nothing otherwise.
pub(crate) fn array<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = (usize, &'a Value)> {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flat_map(|items| items.iter().enumerate())
}

fn push_str(value: Option<&Value>, path: Pointer, found: &mut Vec<Occurrence>) {
    if let Some(id) = value.and_then(Value::as_str) {
        found.push(Occurrence {
            id: id.to_string(),
            path,
        });
    }
}

fn push_strings(value: Option<&Value>, path: &Pointer, found: &mut Vec<Occurrence>) {
    let Some(items) = value.and_then(Value::as_array) else {
        return;
    };
    for (i, item) in items.iter().enumerate() {
        push_str(Some(item), path.index(i), found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ids(occurrences: &[Occurrence]) -> Vec<(&str, &str)> {
        occurrences
            .iter()
            .map(|o| (o.id.as_str(), o.path.as_str()))
            .collect()
    }

    #[test]
    fn test_definitions_cover_branches_names_and_relationships() {
        let document = json!({
            "product_tree": {
                "branches": [{
                    "name": "vendor",
                    "branches": [{
                        "name": "product",
                        "product": { "name": "P 1.0", "product_id": "CSAFPID-0001" }
                    }]
                }],
                "full_product_names": [{ "name": "Other", "product_id": "CSAFPID-0002" }],
                "relationships": [{
                    "product_reference": "CSAFPID-0001",
                    "relates_to_product_reference": "CSAFPID-0002",
                    "full_product_name": { "name": "combo", "product_id": "CSAFPID-0003" }
                }]
            }
        });

        assert_eq!(
            ids(&definitions(&document)),
            vec![
                ("CSAFPID-0001", "/product_tree/branches/0/branches/0/product/product_id"),
                ("CSAFPID-0002", "/product_tree/full_product_names/0/product_id"),
                ("CSAFPID-0003", "/product_tree/relationships/0/full_product_name/product_id"),
            ]
        );
    }

    #[test]
    fn test_references_cover_vulnerability_sections() {
        let document = json!({
            "vulnerabilities": [{
                "product_status": { "fixed": ["A"], "known_affected": ["B", "C"] },
                "remediations": [{ "product_ids": ["D"], "group_ids": ["G1"] }],
                "scores": [{ "products": ["E"] }],
                "threats": [{ "product_ids": ["F"] }]
            }]
        });

        let refs = references(&document);
        assert_eq!(
            refs.iter().map(|o| o.id.as_str()).collect::<Vec<_>>(),
            vec!["A", "B", "C", "D", "F", "E"]
        );
        assert_eq!(refs[2].path.as_str(), "/vulnerabilities/0/product_status/known_affected/1");

        let groups = group_references(&document);
        assert_eq!(
            ids(&groups),
            vec![("G1", "/vulnerabilities/0/remediations/0/group_ids/0")]
        );
    }

    #[test]
    fn test_non_array_sections_are_ignored() {
        let document = json!({ "vulnerabilities": { "not": "an array" }, "product_tree": 3 });
        assert!(definitions(&document).is_empty());
        assert!(references(&document).is_empty());
    }
}

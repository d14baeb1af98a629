use crate::content_graph::domain::Marketplace;
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

/// "Cortex XSOAR", optionally followed by a version ("Cortex XSOAR 6.10", "Cortex XSOAR v8")
static XSOAR_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bCortex XSOAR\b(?P<version>\s*[vV]?[0-9])?")
        .expect("Failed to build XSOAR reference pattern")
});

/// Replaces "Cortex XSOAR" branding for marketplaces that are not XSOAR
///
/// References followed by a version number name a concrete product release
/// and are kept. Other marketplaces get the text back unchanged.
///
/// # Arguments
/// * `text` - Readme, description or metadata text
/// * `marketplace` - Target marketplace
///
/// # Returns
/// The rewritten text; applying the function again yields the same text
pub fn replace_marketplace_references(text: &str, marketplace: Marketplace) -> String {
    if !marketplace.rewrites_xsoar_references() {
        return text.to_string();
    }

    let mut current = text.to_string();
    loop {
        let next = XSOAR_REFERENCE
            .replace_all(&current, |caps: &Captures| {
                if caps.name("version").is_some() {
                    caps[0].to_string()
                } else {
                    "Cortex".to_string()
                }
            })
            .into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Applies [`replace_marketplace_references`] to every string inside a JSON value
pub fn replace_marketplace_references_in_value(value: &mut Value, marketplace: Marketplace) {
    if !marketplace.rewrites_xsoar_references() {
        return;
    }
    match value {
        Value::String(text) => {
            let rewritten = replace_marketplace_references(text, marketplace);
            if rewritten.len() != text.len() {
                *text = rewritten;
            }
        }
        Value::Array(items) => items
            .iter_mut()
            .for_each(|item| replace_marketplace_references_in_value(item, marketplace)),
        Value::Object(map) => map
            .values_mut()
            .for_each(|item| replace_marketplace_references_in_value(item, marketplace)),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

use super::marketplace_references::replace_marketplace_references_in_value;
use crate::content_graph::domain::{ContentItem, Marketplace, Pack, PackDependency, PackMetadata};
use crate::shared::Result;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Appended to the readme of packs with contributors
const CONTRIBUTORS_README_TEMPLATE: &str = "\n### Pack Contributors:\n\n---\n{contributors_names}\nContributions are welcome and appreciated. For more info, visit our [Contribution Guide](https://xsoar.pan.dev/docs/contributing/contributing).\n";

/// MetadataBuilder renders the `metadata.json` and `README.md` of a dumped pack
pub struct MetadataBuilder;

impl MetadataBuilder {
    /// Builds the marketplace metadata document for a pack
    ///
    /// # Arguments
    /// * `pack` - Pack whose descriptive metadata is rendered
    /// * `items` - The items written by the dump, listed under `contentItems`
    /// * `dependencies` - Dependencies from the graph; only direct ones are listed
    /// * `marketplace` - Target marketplace, used for reference rewriting
    ///
    /// # Errors
    /// Returns an error if the pack metadata cannot be represented as JSON
    pub fn build<'a>(
        pack: &Pack,
        items: impl IntoIterator<Item = &'a ContentItem>,
        dependencies: &[PackDependency],
        marketplace: Marketplace,
    ) -> Result<Value> {
        let mut metadata = match serde_json::to_value(pack.metadata())? {
            Value::Object(map) => map,
            other => anyhow::bail!("Pack metadata serialized to a non-object: {}", other),
        };

        for field in PackMetadata::EXCLUDED_FIELDS {
            metadata.remove(field);
        }
        if !pack.is_private() {
            for field in PackMetadata::PRIVATE_FIELDS {
                metadata.remove(field);
            }
        }

        metadata.insert("id".to_string(), Value::from(pack.pack_id()));
        metadata.insert(
            "serverMinVersion".to_string(),
            Value::from(pack.minimum_supported_version().to_string()),
        );
        metadata.insert("contentItems".to_string(), Self::content_items(items));
        metadata.insert(
            "dependencies".to_string(),
            Self::dependencies(dependencies),
        );

        let mut value = Value::Object(metadata);
        replace_marketplace_references_in_value(&mut value, marketplace);

        if let Value::Object(map) = &mut value {
            let empty_modules = map
                .get("supportedModules")
                .is_some_and(|m| m.as_array().is_some_and(Vec::is_empty) || m.is_null());
            if empty_modules {
                map.remove("supportedModules");
            }
        }

        Ok(value)
    }

    /// Serializes a value with sorted keys and four-space indentation
    pub fn to_pretty_json(value: &Value) -> Result<String> {
        let sorted = Self::sort_keys(value.clone());
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        sorted.serialize(&mut serializer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Appends the contributors section to a readme, if there are contributors
    pub fn append_contributors(readme: &str, contributors: &[String]) -> String {
        if contributors.is_empty() {
            return readme.to_string();
        }
        let names: String = contributors
            .iter()
            .map(|name| format!(" - {}\n", name))
            .collect();
        format!(
            "{}{}",
            readme,
            CONTRIBUTORS_README_TEMPLATE.replace("{contributors_names}", &names)
        )
    }

    fn content_items<'a>(items: impl IntoIterator<Item = &'a ContentItem>) -> Value {
        let mut grouped: BTreeMap<&'static str, Vec<Value>> = BTreeMap::new();
        for item in items {
            grouped
                .entry(item.content_type().capabilities().metadata_key)
                .or_default()
                .push(json!({
                    "id": item.object_id(),
                    "name": item.name(),
                    "fromversion": item.from_version().to_string(),
                    "toversion": item.to_version().to_string(),
                }));
        }
        Value::Object(
            grouped
                .into_iter()
                .map(|(key, entries)| (key.to_string(), Value::Array(entries)))
                .collect(),
        )
    }

    fn dependencies(dependencies: &[PackDependency]) -> Value {
        Value::Object(
            dependencies
                .iter()
                .filter(|d| d.is_direct)
                .map(|d| {
                    (
                        d.pack_id.clone(),
                        json!({
                            "mandatory": d.mandatory,
                            "display_name": d.display_name,
                        }),
                    )
                })
                .collect(),
        )
    }

    fn sort_keys(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> = map
                    .into_iter()
                    .map(|(k, v)| (k, Self::sort_keys(v)))
                    .collect();
                Value::Object(sorted.into_iter().collect::<Map<String, Value>>())
            }
            Value::Array(items) => Value::Array(items.into_iter().map(Self::sort_keys).collect()),
            other => other,
        }
    }
}

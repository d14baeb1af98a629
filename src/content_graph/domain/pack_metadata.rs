use super::{ContentVersion, Marketplace};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Descriptive metadata of a pack, as found in its `pack_metadata.json`
///
/// Fields this crate does not interpret are kept in `extra` so they survive
/// into the dumped `metadata.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub support: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub current_version: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub marketplaces: Vec<Marketplace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<String>,
    #[serde(default)]
    pub supported_modules: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_monthly: Option<bool>,
    /// Explicit minimum platform version; derived from content when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_min_version: Option<ContentVersion>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PackMetadata {
    /// Keys only meaningful for premium packs
    pub const PRIVATE_FIELDS: [&'static str; 6] = [
        "premium",
        "vendorId",
        "partnerId",
        "partnerName",
        "previewOnly",
        "disableMonthly",
    ];

    /// Keys never written to `metadata.json`
    pub const EXCLUDED_FIELDS: [&'static str; 2] = ["url", "email"];

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_premium(&self) -> bool {
        self.premium.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_fields() {
        let json = r#"{
            "name": "Hello World",
            "currentVersion": "1.2.3",
            "useCases": ["Phishing"],
            "marketplaces": ["xsoar", "marketplacev2"],
            "serverMinVersion": "6.5",
            "vendorId": "v1",
            "githubUser": ["octo"]
        }"#;
        let metadata: PackMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(metadata.name, "Hello World");
        assert_eq!(metadata.current_version, "1.2.3");
        assert_eq!(metadata.use_cases, vec!["Phishing"]);
        assert_eq!(
            metadata.marketplaces,
            vec![Marketplace::Xsoar, Marketplace::MarketplaceV2]
        );
        assert_eq!(
            metadata.server_min_version,
            Some(ContentVersion::new(6, 5, 0))
        );
        assert_eq!(metadata.vendor_id.as_deref(), Some("v1"));
        assert!(metadata.extra.contains_key("githubUser"));
    }

    #[test]
    fn test_serialize_keeps_extra_fields() {
        let mut metadata = PackMetadata::new("Pack");
        metadata
            .extra
            .insert("githubUser".to_string(), Value::from("octo"));
        let value = serde_json::to_value(&metadata).unwrap();

        assert_eq!(value["githubUser"], "octo");
        assert_eq!(value["name"], "Pack");
        assert!(value.get("premium").is_none());
    }

    #[test]
    fn test_is_premium_defaults_to_false() {
        let mut metadata = PackMetadata::new("Pack");
        assert!(!metadata.is_premium());
        metadata.premium = Some(true);
        assert!(metadata.is_premium());
    }
}

//! Configuration file support for packwright.
//!
//! Provides YAML-based configuration through `packwright.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use packwright::content_graph::domain::{ContentType, Marketplace};
use packwright::content_graph::policies::DeliveryPolicy;
use packwright::shared::Result;

pub const CONFIG_FILENAME: &str = "packwright.config.yml";

/// Upper bound for parallel item uploads
pub const MAX_UPLOAD_CONCURRENCY: usize = 32;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub marketplace: Option<Marketplace>,
    pub exclude_content_types: Option<Vec<ContentType>>,
    /// Per-type override of the marketplaces that only take the type inside
    /// a pack bundle. An empty list disables the escalation for that type.
    pub bundle_only: Option<BTreeMap<ContentType, Vec<Marketplace>>>,
    pub upload_concurrency: Option<usize>,
    pub destination_zip_dir: Option<PathBuf>,
    pub documentation_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Delivery policy with this file's `bundle_only` entries applied
    pub fn delivery_policy(&self) -> DeliveryPolicy {
        let policy = DeliveryPolicy::default();
        match &self.bundle_only {
            Some(overrides) => policy.with_overrides(overrides.iter().map(
                |(content_type, marketplaces)| {
                    (
                        *content_type,
                        marketplaces.iter().copied().collect::<BTreeSet<_>>(),
                    )
                },
            )),
            None => policy,
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax and known marketplace and content type names.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(concurrency) = config.upload_concurrency {
        if concurrency == 0 || concurrency > MAX_UPLOAD_CONCURRENCY {
            bail!(
                "Invalid config: upload_concurrency must be between 1 and {}, got {}.\n\n\
                 💡 Hint: Use 1 to upload items one at a time.",
                MAX_UPLOAD_CONCURRENCY,
                concurrency
            );
        }
    }

    if let Some(ref base_url) = config.base_url {
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            bail!(
                "Invalid config: base_url must start with http:// or https://, got '{}'.",
                base_url
            );
        }
    }

    if let Some(ref excluded) = config.exclude_content_types {
        if excluded.contains(&ContentType::Pack) {
            bail!(
                "Invalid config: exclude_content_types must not contain Pack.\n\n\
                 💡 Hint: List the item types to leave out, such as TestPlaybook."
            );
        }
    }

    if let Some(ref bundle_only) = config.bundle_only {
        for content_type in bundle_only.keys() {
            if content_type.capabilities().individually_uploadable {
                bail!(
                    "Invalid config: bundle_only lists {}, which can be uploaded on its own.\n\n\
                     💡 Hint: Only types without an individual upload endpoint can require a bundle.",
                    content_type
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

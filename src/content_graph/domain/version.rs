use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maximum length for a version string (security limit)
const MAX_VERSION_LENGTH: usize = 64;

/// From-version assigned to content items that do not declare one
pub const DEFAULT_CONTENT_ITEM_FROM_VERSION: &str = "0.0.0";

/// To-version assigned to content items that do not declare one
pub const DEFAULT_CONTENT_ITEM_TO_VERSION: &str = "99.99.99";

/// Lowest platform version any marketplace accepts
pub const MARKETPLACE_MIN_VERSION: &str = "6.0.0";

/// Platform version with semantic ordering
///
/// Content files frequently use two-component versions ("6.5"); these are
/// padded to full semver so that `6.10.0 > 6.9.0` compares correctly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentVersion(semver::Version);

impl ContentVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parses a version, accepting one to three numeric components
    pub fn parse(raw: &str) -> crate::shared::Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            anyhow::bail!("Version cannot be empty");
        }
        if trimmed.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Version is too long ({} bytes). Maximum allowed: {} bytes",
                trimmed.len(),
                MAX_VERSION_LENGTH
            );
        }

        let core_end = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
        let (core, suffix) = trimmed.split_at(core_end);
        let components = core.split('.').count();
        let padded = match components {
            1 => format!("{}.0.0{}", core, suffix),
            2 => format!("{}.0{}", core, suffix),
            _ => trimmed.to_string(),
        };

        semver::Version::parse(&padded)
            .map(Self)
            .map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", raw, e))
    }

    /// The sentinel from-version carried by items with no explicit bound
    pub fn default_from() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn default_to() -> Self {
        Self::new(99, 99, 99)
    }

    /// The global marketplace floor
    pub fn marketplace_floor() -> Self {
        Self::new(6, 0, 0)
    }

    pub fn is_default_from(&self) -> bool {
        *self == Self::default_from()
    }
}

impl fmt::Display for ContentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ContentVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContentVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ContentVersion::parse(&raw).map_err(serde::de::Error::custom)
    }
}

use crate::content_graph::domain::{ContentType, Marketplace};
use std::collections::{BTreeMap, BTreeSet};

/// DeliveryPolicy records which marketplaces only accept a content type
/// inside a pack bundle
///
/// During an item-by-item upload, an item that cannot be uploaded on its own
/// is skipped, unless this table says its type must be bundled for the
/// target marketplace; then the whole pack upload aborts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPolicy {
    bundle_only: BTreeMap<ContentType, BTreeSet<Marketplace>>,
}

impl DeliveryPolicy {
    /// Marketplaces that require bundle delivery for types the platform does
    /// not accept individually
    pub const DEFAULT_BUNDLE_MARKETPLACES: [Marketplace; 2] =
        [Marketplace::MarketplaceV2, Marketplace::Platform];

    /// Creates an empty policy (nothing escalates)
    pub fn empty() -> Self {
        Self {
            bundle_only: BTreeMap::new(),
        }
    }

    /// Replaces the entry for each configured type
    ///
    /// An empty marketplace set turns the escalation off for that type.
    pub fn with_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (ContentType, BTreeSet<Marketplace>)>,
    ) -> Self {
        for (content_type, marketplaces) in overrides {
            if marketplaces.is_empty() {
                self.bundle_only.remove(&content_type);
            } else {
                self.bundle_only.insert(content_type, marketplaces);
            }
        }
        self
    }

    pub fn requires_bundle(&self, content_type: ContentType, marketplace: Marketplace) -> bool {
        self.bundle_only
            .get(&content_type)
            .is_some_and(|marketplaces| marketplaces.contains(&marketplace))
    }

    pub fn entries(&self) -> &BTreeMap<ContentType, BTreeSet<Marketplace>> {
        &self.bundle_only
    }
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        let bundle_only = ContentType::ALL
            .into_iter()
            .filter(|t| {
                let caps = t.capabilities();
                caps.dumpable && !caps.individually_uploadable
            })
            .map(|t| (t, Self::DEFAULT_BUNDLE_MARKETPLACES.into_iter().collect()))
            .collect();
        Self { bundle_only }
    }
}

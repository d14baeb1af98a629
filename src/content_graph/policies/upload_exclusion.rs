use crate::content_graph::domain::ContentType;
use std::collections::BTreeSet;

/// UploadExclusionPolicy decides which content types are left out of dumps
/// and item-by-item uploads
///
/// Test playbooks are excluded unless explicitly requested; configuration
/// may exclude further types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadExclusionPolicy {
    excluded: BTreeSet<ContentType>,
}

impl UploadExclusionPolicy {
    /// Types excluded when nothing else is configured
    pub const DEFAULT_EXCLUDED: [ContentType; 1] = [ContentType::TestPlaybook];

    /// Creates the default policy
    ///
    /// # Arguments
    /// * `include_test_playbooks` - Re-include `TestPlaybook` items
    pub fn new(include_test_playbooks: bool) -> Self {
        let mut excluded: BTreeSet<ContentType> = Self::DEFAULT_EXCLUDED.into_iter().collect();
        if include_test_playbooks {
            excluded.remove(&ContentType::TestPlaybook);
        }
        Self { excluded }
    }

    /// Adds configured exclusions on top of the defaults
    pub fn with_additional(mut self, types: impl IntoIterator<Item = ContentType>) -> Self {
        self.excluded.extend(types);
        self
    }

    pub fn is_excluded(&self, content_type: ContentType) -> bool {
        self.excluded.contains(&content_type)
    }

    pub fn excluded(&self) -> &BTreeSet<ContentType> {
        &self.excluded
    }
}

impl Default for UploadExclusionPolicy {
    fn default() -> Self {
        Self::new(false)
    }
}

use super::{ContentItem, ContentType};
use std::collections::BTreeMap;

/// Content items of a pack grouped by content type
///
/// Types iterate in their declaration order; items keep the order in which
/// they were encountered in the graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackContentItems {
    by_type: BTreeMap<ContentType, Vec<ContentItem>>,
}

impl PackContentItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ContentItem) {
        self.by_type.entry(item.content_type()).or_default().push(item);
    }

    pub fn of_type(&self, content_type: ContentType) -> &[ContentItem] {
        self.by_type
            .get(&content_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn types(&self) -> impl Iterator<Item = ContentType> + '_ {
        self.by_type.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.by_type.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl FromIterator<ContentItem> for PackContentItems {
    fn from_iter<I: IntoIterator<Item = ContentItem>>(iter: I) -> Self {
        let mut items = Self::new();
        for item in iter {
            items.push(item);
        }
        items
    }
}

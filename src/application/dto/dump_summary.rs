use crate::content_graph::domain::ItemRef;
use std::fmt;
use std::path::PathBuf;

/// Why an owned item was left out of a dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ExcludedType,
    MarketplaceMismatch,
    NotDumpable,
    MissingSource,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ExcludedType => write!(f, "content type is excluded"),
            SkipReason::MarketplaceMismatch => write!(f, "not available in the target marketplace"),
            SkipReason::NotDumpable => write!(f, "content type is not dumped"),
            SkipReason::MissingSource => write!(f, "source file is missing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub item: ItemRef,
    pub reason: SkipReason,
}

/// DumpSummary - What a dump wrote and what it left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpSummary {
    pub pack_id: String,
    pub destination: PathBuf,
    pub dumped: Vec<ItemRef>,
    pub skipped: Vec<SkippedItem>,
    /// Optional pack files that were present and copied
    pub copied_files: Vec<String>,
}

impl DumpSummary {
    pub fn new(pack_id: String, destination: PathBuf) -> Self {
        Self {
            pack_id,
            destination,
            dumped: Vec::new(),
            skipped: Vec::new(),
            copied_files: Vec::new(),
        }
    }

    pub fn skip(&mut self, item: ItemRef, reason: SkipReason) {
        self.skipped.push(SkippedItem { item, reason });
    }

    pub fn skipped_with(&self, reason: SkipReason) -> impl Iterator<Item = &ItemRef> {
        self.skipped
            .iter()
            .filter(move |s| s.reason == reason)
            .map(|s| &s.item)
    }
}

use crate::content_graph::domain::{ContentItem, Marketplace};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Per-item serialization failures
#[derive(Debug, Error)]
pub enum ItemDumpError {
    /// The item's source file is gone; dumps log and skip it
    #[error("Source file of {item} does not exist: {path}")]
    MissingSource { item: String, path: PathBuf },

    #[error("Failed to dump {item}: {details}")]
    Failed { item: String, details: String },
}

/// ItemSerializer port for writing one content item in marketplace shape
///
/// Field mappings are specific to each content type and live behind this
/// port.
pub trait ItemSerializer {
    /// Writes `item` into `dir`
    ///
    /// # Arguments
    /// * `item` - The content item to write
    /// * `dir` - Destination folder (created if missing)
    /// * `marketplace` - Target marketplace
    ///
    /// # Returns
    /// Path of the written file
    fn dump(
        &self,
        item: &ContentItem,
        dir: &Path,
        marketplace: Marketplace,
    ) -> Result<PathBuf, ItemDumpError>;
}

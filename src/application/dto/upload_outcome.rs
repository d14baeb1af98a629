use crate::content_graph::domain::ItemRef;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadMode {
    /// One zipped pack; `archive` is the uploaded file name
    Bundle { archive: String },
    ItemByItem,
}

/// UploadOutcome - A pack upload that fully succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub pack_id: String,
    pub mode: UploadMode,
    pub uploaded: Vec<ItemRef>,
    /// Items skipped because the platform does not accept them individually
    pub skipped: Vec<ItemRef>,
    /// Outer multi-pack archive, when it could be written
    pub outer_archive: Option<PathBuf>,
}

use super::{ContentType, ContentVersion, Marketplace};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Identifies the item an upload result belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub content_type: ContentType,
    pub object_id: String,
    pub path: PathBuf,
}

impl ItemRef {
    pub fn new(content_type: ContentType, object_id: String, path: PathBuf) -> Self {
        Self {
            content_type,
            object_id,
            path,
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.content_type, self.object_id)
    }
}

/// A response the platform returned instead of accepting an upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadResponse {
    pub status: u16,
    pub body: Value,
}

/// Why a single upload failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request itself failed (API error or transport problem)
    Api,
    /// The platform answered with a rejection
    Rejected,
    /// The item could not be prepared for upload
    Preparation,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Api => write!(f, "API error"),
            FailureKind::Rejected => write!(f, "rejected"),
            FailureKind::Preparation => write!(f, "preparation failed"),
        }
    }
}

/// One item (or pack archive) the platform did not accept
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to upload {item} ({kind}): {additional_info}")]
pub struct FailedUpload {
    pub item: ItemRef,
    pub kind: FailureKind,
    pub status: Option<u16>,
    /// Raw response payload, `Value::Null` when there was none
    pub response_body: Value,
    pub additional_info: String,
}

/// An item whose version bounds exclude the target platform version
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{item} supports versions {item_from_version} to {item_to_version}, target is {target_version}")]
pub struct IncompatibleUpload {
    pub item: ItemRef,
    pub item_from_version: ContentVersion,
    pub item_to_version: ContentVersion,
    pub target_version: ContentVersion,
}

/// Aggregated result of an item-by-item upload that did not fully succeed
#[derive(Debug, Clone, PartialEq, Default, Error)]
#[error(
    "Upload finished with {} failure(s) and {} incompatible item(s); {} item(s) uploaded",
    .failures.len(),
    .incompatible.len(),
    .uploaded.len()
)]
pub struct FailedUploadMultiple {
    pub uploaded: Vec<ItemRef>,
    pub failures: Vec<FailedUpload>,
    pub incompatible: Vec<IncompatibleUpload>,
}

impl FailedUploadMultiple {
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty() && self.incompatible.is_empty()
    }
}

/// Errors raised by the upload use cases
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Uploading packs to {marketplace} versions earlier than {minimum} is not supported (target: {target})\n\n💡 Hint: Upload item by item or target a newer platform")]
    UnsupportedTargetVersion {
        marketplace: Marketplace,
        target: ContentVersion,
        minimum: ContentVersion,
    },

    #[error("{item} cannot be uploaded individually to {marketplace}\n\n💡 Hint: Upload the pack as a zip (--zip)")]
    NotIndividuallyUploadable {
        item: ItemRef,
        marketplace: Marketplace,
    },

    #[error(transparent)]
    Failed(#[from] FailedUpload),

    #[error(transparent)]
    Multiple(#[from] FailedUploadMultiple),

    #[error("Cannot upload {path} as a zip archive\n\n💡 Hint: Pass a file with the .zip extension")]
    NotAnArchive { path: PathBuf },
}

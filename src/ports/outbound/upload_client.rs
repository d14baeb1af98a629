use crate::content_graph::domain::ContentItem;
use crate::content_graph::services::UploadOptions;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

pub use crate::content_graph::domain::UploadResponse;

/// Errors raised by an upload client before a response could be interpreted
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("API error {status} {reason}: {body}")]
    Api {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Transport error: {0}")]
    Transport(String),
}

/// UploadClient port for the remote platform
///
/// `Ok(None)` means the platform accepted the upload. `Ok(Some(_))` carries
/// a response the platform returned instead, which callers turn into a
/// failure record.
///
/// Implementations must be `Send + Sync` so item uploads can run concurrently.
#[async_trait]
pub trait UploadClient: Send + Sync {
    /// Uploads a zipped pack
    async fn upload_bundle(
        &self,
        archive: &Path,
        options: &UploadOptions,
    ) -> Result<Option<UploadResponse>, ClientError>;

    /// Uploads a single dumped content item
    ///
    /// # Arguments
    /// * `item` - The item being uploaded (selects the endpoint)
    /// * `file` - The dumped file of the item
    /// * `options` - Request flags
    async fn upload_item(
        &self,
        item: &ContentItem,
        file: &Path,
        options: &UploadOptions,
    ) -> Result<Option<UploadResponse>, ClientError>;
}

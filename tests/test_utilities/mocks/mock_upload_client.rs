use async_trait::async_trait;
use packwright::content_graph::domain::UploadResponse;
use packwright::content_graph::services::UploadOptions;
use packwright::ports::outbound::ClientError;
use packwright::prelude::{ContentItem, UploadClient};
use serde_json::json;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// One request the mock received
#[derive(Debug, Clone, PartialEq)]
pub enum UploadCall {
    /// Archive file name and the entry names inside it
    Bundle {
        archive: String,
        entries: Vec<String>,
        skip_validation: bool,
    },
    /// Item id and the file name it was dumped to
    Item { object_id: String, file: String },
}

/// Mock UploadClient that accepts everything except the configured item ids
#[derive(Default, Clone)]
pub struct MockUploadClient {
    rejected: HashSet<String>,
    pub calls: Arc<Mutex<Vec<UploadCall>>>,
}

impl MockUploadClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(mut self, object_id: &str) -> Self {
        self.rejected.insert(object_id.to_string());
        self
    }

    pub fn get_calls(&self) -> Vec<UploadCall> {
        self.calls.lock().unwrap().clone()
    }

    fn entries(archive: &Path) -> Vec<String> {
        let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect()
    }
}

#[async_trait]
impl UploadClient for MockUploadClient {
    async fn upload_bundle(
        &self,
        archive: &Path,
        options: &UploadOptions,
    ) -> Result<Option<UploadResponse>, ClientError> {
        let call = UploadCall::Bundle {
            archive: archive.file_name().unwrap().to_string_lossy().into_owned(),
            entries: Self::entries(archive),
            skip_validation: options.skip_validation,
        };
        self.calls.lock().unwrap().push(call);
        Ok(None)
    }

    async fn upload_item(
        &self,
        item: &ContentItem,
        file: &Path,
        _options: &UploadOptions,
    ) -> Result<Option<UploadResponse>, ClientError> {
        self.calls.lock().unwrap().push(UploadCall::Item {
            object_id: item.object_id().to_string(),
            file: file.file_name().unwrap().to_string_lossy().into_owned(),
        });
        if self.rejected.contains(item.object_id()) {
            return Ok(Some(UploadResponse {
                status: 400,
                body: json!({"error": format!("{} is invalid", item.object_id())}),
            }));
        }
        Ok(None)
    }
}

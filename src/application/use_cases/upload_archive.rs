use crate::application::use_cases::upload_pack::api_failure;
use crate::content_graph::domain::{
    ContentType, ContentVersion, ItemRef, Marketplace, UploadError,
};
use crate::content_graph::services::{parse_upload_response, VersionGate};
use crate::ports::outbound::{ProgressReporter, UploadClient};
use crate::shared::error::PackError;
use crate::shared::Result;
use std::path::Path;
use tracing::info;

/// UploadArchiveUseCase - Uploads an already zipped pack
///
/// # Type Parameters
/// * `C` - UploadClient implementation
/// * `PR` - ProgressReporter implementation
pub struct UploadArchiveUseCase<C, PR> {
    client: C,
    progress_reporter: PR,
}

impl<C, PR> UploadArchiveUseCase<C, PR>
where
    C: UploadClient,
    PR: ProgressReporter,
{
    pub fn new(client: C, progress_reporter: PR) -> Self {
        Self {
            client,
            progress_reporter,
        }
    }

    /// Uploads `archive` to `marketplace`
    ///
    /// # Errors
    /// Returns `UploadError::NotAnArchive` for paths without a `.zip`
    /// extension, `UploadError::UnsupportedTargetVersion` when the version
    /// gate refuses the target, and `UploadError::Failed` when the platform
    /// does not accept the archive
    pub async fn execute(
        &self,
        archive: &Path,
        marketplace: Marketplace,
        target_version: &ContentVersion,
        skip_validation: bool,
    ) -> Result<()> {
        let is_zip = archive
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        if !is_zip {
            return Err(UploadError::NotAnArchive {
                path: archive.to_path_buf(),
            }
            .into());
        }
        VersionGate::check_bundle_upload(marketplace, target_version)?;
        if !archive.is_file() {
            return Err(PackError::FileReadError {
                path: archive.to_path_buf(),
                details: "No such file".to_string(),
            }
            .into());
        }

        let options = VersionGate::upload_options(skip_validation, target_version);
        self.progress_reporter.report(&format!(
            "🚀 Uploading {} to {}",
            archive.display(),
            marketplace
        ));

        let archive_ref = ItemRef::new(
            ContentType::Pack,
            archive
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            archive.to_path_buf(),
        );
        match self.client.upload_bundle(archive, &options).await {
            Ok(None) => {
                info!(archive = %archive.display(), %marketplace, "Uploaded archive");
                self.progress_reporter
                    .report_completion(&format!("✅ Uploaded {}", archive.display()));
                Ok(())
            }
            Ok(Some(response)) => {
                Err(UploadError::Failed(parse_upload_response(archive_ref, &response)).into())
            }
            Err(e) => Err(UploadError::Failed(api_failure(archive_ref, e)).into()),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_graph::domain::{ContentItem, FailureKind, UploadResponse};
    use crate::content_graph::services::UploadOptions;
    use crate::ports::outbound::ClientError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct MockUploadClient {
        response: Option<UploadResponse>,
        calls: Mutex<Vec<(PathBuf, UploadOptions)>>,
    }

    impl MockUploadClient {
        fn new(response: Option<UploadResponse>) -> Self {
            Self {
                response,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UploadClient for MockUploadClient {
        async fn upload_bundle(
            &self,
            archive: &Path,
            options: &UploadOptions,
        ) -> std::result::Result<Option<UploadResponse>, ClientError> {
            self.calls
                .lock()
                .unwrap()
                .push((archive.to_path_buf(), *options));
            Ok(self.response.clone())
        }

        async fn upload_item(
            &self,
            _item: &ContentItem,
            _file: &Path,
            _options: &UploadOptions,
        ) -> std::result::Result<Option<UploadResponse>, ClientError> {
            unreachable!("archives are uploaded as bundles")
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_warning(&self, _message: &str) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn archive_in(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"PK").unwrap();
        path
    }

    #[tokio::test]
    async fn test_rejects_non_zip_paths() {
        let dir = TempDir::new().unwrap();
        let path = archive_in(&dir, "HelloWorld.tar.gz");
        let use_case = UploadArchiveUseCase::new(MockUploadClient::new(None), SilentReporter);

        let err = use_case
            .execute(&path, Marketplace::Xsoar, &ContentVersion::new(8, 0, 0), false)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<UploadError>(),
            Some(UploadError::NotAnArchive { .. })
        ));
        assert!(use_case.client().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_applies_version_gate() {
        let dir = TempDir::new().unwrap();
        let path = archive_in(&dir, "HelloWorld.zip");
        let use_case = UploadArchiveUseCase::new(MockUploadClient::new(None), SilentReporter);

        let err = use_case
            .execute(&path, Marketplace::Xsoar, &ContentVersion::new(6, 0, 0), false)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<UploadError>(),
            Some(UploadError::UnsupportedTargetVersion { .. })
        ));
        assert!(use_case.client().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_uploads_with_gated_options() {
        let dir = TempDir::new().unwrap();
        let path = archive_in(&dir, "HelloWorld.ZIP");
        let use_case = UploadArchiveUseCase::new(MockUploadClient::new(None), SilentReporter);

        use_case
            .execute(&path, Marketplace::MarketplaceV2, &ContentVersion::new(6, 6, 0), true)
            .await
            .unwrap();

        let calls = use_case.client().calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, path);
        assert!(calls[0].1.skip_validation);
        assert!(calls[0].1.skip_verify);
    }

    #[tokio::test]
    async fn test_missing_archive_is_reported_before_upload() {
        let dir = TempDir::new().unwrap();
        let use_case = UploadArchiveUseCase::new(MockUploadClient::new(None), SilentReporter);

        let err = use_case
            .execute(
                &dir.path().join("missing.zip"),
                Marketplace::Xsoar,
                &ContentVersion::new(8, 0, 0),
                false,
            )
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<PackError>().is_some());
        assert!(use_case.client().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_platform_rejection_becomes_failure() {
        let dir = TempDir::new().unwrap();
        let path = archive_in(&dir, "HelloWorld.zip");
        let response = UploadResponse {
            status: 400,
            body: json!({"error": "Invalid pack"}),
        };
        let use_case =
            UploadArchiveUseCase::new(MockUploadClient::new(Some(response)), SilentReporter);

        let err = use_case
            .execute(&path, Marketplace::Xsoar, &ContentVersion::new(8, 0, 0), false)
            .await
            .unwrap_err();

        let Some(UploadError::Failed(failure)) = err.downcast_ref::<UploadError>() else {
            panic!("expected Failed, got {err}");
        };
        assert_eq!(failure.item.object_id, "HelloWorld");
        assert_eq!(failure.kind, FailureKind::Rejected);
        assert_eq!(failure.additional_info, "Invalid pack");
    }
}

use crate::application::dto::{DumpRequest, UploadMode, UploadOutcome, UploadRequest};
use crate::application::use_cases::DumpPackUseCase;
use crate::content_graph::domain::{
    ContentGraph, ContentItem, ContentType, FailedUpload, FailedUploadMultiple, FailureKind,
    IncompatibleUpload, ItemRef, Pack, PackContentItems, UploadError,
};
use crate::content_graph::policies::{DeliveryPolicy, UploadExclusionPolicy};
use crate::content_graph::services::{parse_upload_response, UploadOptions, VersionGate};
use crate::ports::outbound::{
    Archiver, ArtifactStore, ClientError, ItemSerializer, ProgressReporter, UploadClient,
};
use crate::shared::error::PackError;
use crate::shared::security::is_contained_relative_path;
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, error, info, warn};

/// File name of the archive holding every pack zipped by one use case
pub const OUTER_ARCHIVE_NAME: &str = "uploadable_packs.zip";

/// Result of uploading a single content item
#[derive(Debug)]
enum ItemOutcome {
    Uploaded(ItemRef),
    NotIndividuallyUploadable(ItemRef),
    Incompatible(IncompatibleUpload),
    Failed(FailedUpload),
}

/// UploadPackUseCase - Uploads packs to a platform, zipped or item by item
///
/// Zipped packs are staged in a directory owned by the use case, so archives
/// of every pack uploaded through one instance accumulate there and end up
/// together in the outer archive.
///
/// # Type Parameters
/// * `S` - ItemSerializer implementation
/// * `A` - ArtifactStore implementation
/// * `Z` - Archiver implementation
/// * `C` - UploadClient implementation
/// * `PR` - ProgressReporter implementation
pub struct UploadPackUseCase<S, A, Z, C, PR> {
    dumper: DumpPackUseCase<S, A, PR>,
    archiver: Z,
    client: C,
    delivery_policy: DeliveryPolicy,
    upload_concurrency: usize,
    staging: TempDir,
}

impl<S, A, Z, C, PR> UploadPackUseCase<S, A, Z, C, PR>
where
    S: ItemSerializer,
    A: ArtifactStore,
    Z: Archiver,
    C: UploadClient,
    PR: ProgressReporter,
{
    /// Creates a new use case and its staging directory
    ///
    /// # Errors
    /// Returns an error if the staging directory cannot be created
    pub fn new(dumper: DumpPackUseCase<S, A, PR>, archiver: Z, client: C) -> Result<Self> {
        let staging = TempDir::new().map_err(|e| PackError::FileWriteError {
            path: std::env::temp_dir(),
            details: format!("Failed to create staging directory: {}", e),
        })?;
        Ok(Self {
            dumper,
            archiver,
            client,
            delivery_policy: DeliveryPolicy::default(),
            upload_concurrency: 1,
            staging,
        })
    }

    pub fn with_delivery_policy(mut self, delivery_policy: DeliveryPolicy) -> Self {
        self.delivery_policy = delivery_policy;
        self
    }

    /// Number of item uploads in flight at once (at least one)
    pub fn with_upload_concurrency(mut self, upload_concurrency: usize) -> Self {
        self.upload_concurrency = upload_concurrency.max(1);
        self
    }

    pub fn staging_dir(&self) -> &Path {
        self.staging.path()
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Uploads `pack` in the mode `request.zip` selects
    ///
    /// # Errors
    /// Upload outcomes surface as [`UploadError`] inside the returned error:
    /// `UnsupportedTargetVersion` and `Failed` in bundle mode,
    /// `NotIndividuallyUploadable` and `Multiple` item by item. Dump and
    /// archive failures surface as [`PackError`].
    pub async fn execute(
        &self,
        pack: &mut Pack,
        graph: &ContentGraph,
        request: &UploadRequest,
    ) -> Result<UploadOutcome> {
        if request.zip {
            self.upload_bundle(pack, graph, request).await
        } else {
            self.upload_items(pack, graph, request).await
        }
    }

    async fn upload_bundle(
        &self,
        pack: &mut Pack,
        graph: &ContentGraph,
        request: &UploadRequest,
    ) -> Result<UploadOutcome> {
        VersionGate::check_bundle_upload(request.marketplace, &request.target_version)?;
        let options = VersionGate::upload_options(request.skip_validation, &request.target_version);

        let dump_dir = TempDir::new().map_err(|e| PackError::FileWriteError {
            path: std::env::temp_dir(),
            details: format!("Failed to create dump directory: {}", e),
        })?;
        let dump_request = DumpRequest::new(dump_dir.path().join(pack.pack_id()), request.marketplace)
            .with_test_playbooks(request.include_test_playbooks)
            .with_excluded_content_types(request.excluded_content_types.clone())
            .with_documentation_dir(request.documentation_dir.clone());
        let summary = self.dumper.execute(pack, graph, &dump_request)?;

        let archive = Self::archive_name(pack);
        let archive_path = self.staging.path().join(&archive);
        self.archiver
            .archive_dir(&dump_request.destination, &archive_path)?;
        debug!(pack = pack.pack_id(), archive = %archive_path.display(), "Zipped pack");

        let outer_archive = self.write_outer_archive(request.destination_zip_dir.as_deref());

        self.dumper
            .progress_reporter()
            .report(&format!("🚀 Uploading {} to {}", archive, request.marketplace));
        let pack_ref = ItemRef::new(ContentType::Pack, pack.pack_id().to_string(), archive_path.clone());
        match self.client.upload_bundle(&archive_path, &options).await {
            Ok(None) => {
                info!(pack = pack.pack_id(), marketplace = %request.marketplace, "Uploaded pack");
                Ok(UploadOutcome {
                    pack_id: pack.pack_id().to_string(),
                    mode: UploadMode::Bundle { archive },
                    uploaded: summary.dumped,
                    skipped: Vec::new(),
                    outer_archive,
                })
            }
            Ok(Some(response)) => {
                Err(UploadError::Failed(parse_upload_response(pack_ref, &response)).into())
            }
            Err(e) => Err(UploadError::Failed(api_failure(pack_ref, e)).into()),
        }
    }

    async fn upload_items(
        &self,
        pack: &mut Pack,
        graph: &ContentGraph,
        request: &UploadRequest,
    ) -> Result<UploadOutcome> {
        let options = VersionGate::upload_options(request.skip_validation, &request.target_version);
        pack.ensure_content_items(graph)?;
        let pack: &Pack = pack;
        let empty = PackContentItems::new();
        let policy = UploadExclusionPolicy::new(request.include_test_playbooks)
            .with_additional(request.excluded_content_types.iter().copied());

        let items: Vec<&ContentItem> = pack
            .content_items()
            .unwrap_or(&empty)
            .iter()
            .filter(|item| !policy.is_excluded(item.content_type()))
            .collect();
        let total = items.len();

        self.dumper.progress_reporter().report(&format!(
            "🚀 Uploading {} content item(s) of pack {} to {}",
            total,
            pack.name(),
            request.marketplace
        ));

        let mut uploads = stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| async move {
                (index, self.upload_item(item, request, &options).await)
            })
            .buffer_unordered(self.upload_concurrency);

        let mut outcomes: Vec<(usize, ItemOutcome)> = Vec::with_capacity(total);
        while let Some((index, outcome)) = uploads.next().await {
            if let ItemOutcome::NotIndividuallyUploadable(item) = &outcome {
                if self
                    .delivery_policy
                    .requires_bundle(item.content_type, request.marketplace)
                {
                    return Err(UploadError::NotIndividuallyUploadable {
                        item: item.clone(),
                        marketplace: request.marketplace,
                    }
                    .into());
                }
            }
            outcomes.push((index, outcome));
            self.dumper
                .progress_reporter()
                .report_progress(outcomes.len(), total, None);
        }
        outcomes.sort_by_key(|(index, _)| *index);

        let mut result = FailedUploadMultiple::default();
        let mut skipped = Vec::new();
        for (_, outcome) in outcomes {
            match outcome {
                ItemOutcome::Uploaded(item) => result.uploaded.push(item),
                ItemOutcome::NotIndividuallyUploadable(item) => {
                    warn!(item = %item, marketplace = %request.marketplace, "Content type cannot be uploaded individually, skipping");
                    self.dumper.progress_reporter().report_warning(&format!(
                        "Skipped {}: not uploadable item by item",
                        item
                    ));
                    skipped.push(item);
                }
                ItemOutcome::Incompatible(incompatible) => result.incompatible.push(incompatible),
                ItemOutcome::Failed(failure) => {
                    self.dumper
                        .progress_reporter()
                        .report_error(&failure.to_string());
                    result.failures.push(failure);
                }
            }
        }

        if !result.is_empty() {
            return Err(UploadError::Multiple(result).into());
        }

        info!(
            pack = pack.pack_id(),
            uploaded = result.uploaded.len(),
            skipped = skipped.len(),
            "Uploaded pack item by item"
        );
        Ok(UploadOutcome {
            pack_id: pack.pack_id().to_string(),
            mode: UploadMode::ItemByItem,
            uploaded: result.uploaded,
            skipped,
            outer_archive: None,
        })
    }

    async fn upload_item(
        &self,
        item: &ContentItem,
        request: &UploadRequest,
        options: &UploadOptions,
    ) -> ItemOutcome {
        let item_ref = item.item_ref();
        if !item.content_type().capabilities().individually_uploadable {
            return ItemOutcome::NotIndividuallyUploadable(item_ref);
        }
        if !item.supports_version(&request.target_version) {
            return ItemOutcome::Incompatible(IncompatibleUpload {
                item: item_ref,
                item_from_version: item.from_version().clone(),
                item_to_version: item.to_version().clone(),
                target_version: request.target_version.clone(),
            });
        }

        let dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(e) => return ItemOutcome::Failed(preparation_failure(item_ref, e.to_string())),
        };
        let file = match self
            .dumper
            .serializer()
            .dump(item, dir.path(), request.marketplace)
        {
            Ok(file) => file,
            Err(e) => return ItemOutcome::Failed(preparation_failure(item_ref, e.to_string())),
        };

        match self.client.upload_item(item, &file, options).await {
            Ok(None) => {
                debug!(item = %item, "Uploaded content item");
                ItemOutcome::Uploaded(item_ref)
            }
            Ok(Some(response)) => ItemOutcome::Failed(parse_upload_response(item_ref, &response)),
            Err(e) => ItemOutcome::Failed(api_failure(item_ref, e)),
        }
    }

    /// `<pack name>.zip`, or `<pack id>.zip` when the name is not a plain file name
    fn archive_name(pack: &Pack) -> String {
        let by_name = format!("{}.zip", pack.name());
        let path = Path::new(&by_name);
        if is_contained_relative_path(path) && path.components().count() == 1 {
            by_name
        } else {
            format!("{}.zip", pack.pack_id())
        }
    }

    /// Zips the staging directory into `<dir>/uploadable_packs.zip`
    ///
    /// Failure leaves the upload itself unaffected.
    fn write_outer_archive(&self, destination_zip_dir: Option<&Path>) -> Option<PathBuf> {
        let Some(dir) = destination_zip_dir else {
            debug!("No destination zip directory, skipping outer archive");
            return None;
        };
        let path = dir.join(OUTER_ARCHIVE_NAME);
        match self.archiver.archive_dir(self.staging.path(), &path) {
            Ok(()) => {
                info!(archive = %path.display(), "Wrote outer archive");
                Some(path)
            }
            Err(e) => {
                error!(archive = %path.display(), error = %e, "Failed to write outer archive");
                self.dumper
                    .progress_reporter()
                    .report_warning(&format!("Could not write {}: {}", path.display(), e));
                None
            }
        }
    }
}

/// Failure record for a client error
pub(crate) fn api_failure(item: ItemRef, error: ClientError) -> FailedUpload {
    let (status, response_body) = match &error {
        ClientError::Api { status, body, .. } => (
            Some(*status),
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone())),
        ),
        ClientError::Transport(_) => (None, Value::Null),
    };
    FailedUpload {
        item,
        kind: FailureKind::Api,
        status,
        response_body,
        additional_info: error.to_string(),
    }
}

fn preparation_failure(item: ItemRef, details: String) -> FailedUpload {
    FailedUpload {
        item,
        kind: FailureKind::Preparation,
        status: None,
        response_body: Value::Null,
        additional_info: details,
    }
}

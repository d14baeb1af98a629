use crate::application::dto::{DumpRequest, DumpSummary, SkipReason};
use crate::content_graph::domain::{
    ContentGraph, ContentItem, ContentType, Marketplace, Pack, PackContentItems,
};
use crate::content_graph::policies::UploadExclusionPolicy;
use crate::content_graph::services::{
    replace_marketplace_references, MarketplaceTagParser, MetadataBuilder,
};
use crate::ports::outbound::{ArtifactStore, ItemDumpError, ItemSerializer, ProgressReporter};
use crate::shared::error::PackError;
use crate::shared::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const PACK_METADATA_FILENAME: &str = "pack_metadata.json";
const VERSION_CONFIG_FILENAME: &str = "version_config.json";
const AUTHOR_IMAGE_FILENAME: &str = "Author_image.png";
const README_FILENAME: &str = "README.md";
const METADATA_FILENAME: &str = "metadata.json";
const RELEASE_NOTES_DIR: &str = "ReleaseNotes";
const DOC_FILES_DIR: &str = "doc_files";
const DOCUMENTATION_DIR: &str = "Documentation";
const BASE_PACK: &str = "Base";

/// DumpPackUseCase - Writes a pack as a marketplace-shaped directory tree
///
/// # Type Parameters
/// * `S` - ItemSerializer implementation
/// * `A` - ArtifactStore implementation
/// * `PR` - ProgressReporter implementation
pub struct DumpPackUseCase<S, A, PR> {
    serializer: S,
    store: A,
    progress_reporter: PR,
}

impl<S, A, PR> DumpPackUseCase<S, A, PR>
where
    S: ItemSerializer,
    A: ArtifactStore,
    PR: ProgressReporter,
{
    pub fn new(serializer: S, store: A, progress_reporter: PR) -> Self {
        Self {
            serializer,
            store,
            progress_reporter,
        }
    }

    /// Dumps `pack` into `request.destination`
    ///
    /// # Arguments
    /// * `pack` - Pack to dump; its content items are computed if needed
    /// * `graph` - Graph the pack was loaded from
    /// * `request` - Destination, marketplace and filtering options
    ///
    /// # Returns
    /// A summary of written and skipped items and the optional files copied
    ///
    /// # Errors
    /// Returns an error if the pack source directory is missing, the
    /// destination cannot be created, or an item fails for a reason other
    /// than a missing source file. The destination is then in an undefined
    /// state and should be discarded.
    pub fn execute(
        &self,
        pack: &mut Pack,
        graph: &ContentGraph,
        request: &DumpRequest,
    ) -> Result<DumpSummary> {
        if !self.store.dir_exists(pack.path()) {
            return Err(PackError::PackSourceMissing {
                path: pack.path().to_path_buf(),
            }
            .into());
        }

        self.progress_reporter.report(&format!(
            "📦 Dumping pack {} for {} into {}",
            pack.name(),
            request.marketplace,
            request.destination.display()
        ));
        self.store.create_dir(&request.destination)?;

        pack.ensure_content_items(graph)?;
        let pack: &Pack = pack;
        let empty = PackContentItems::new();
        let items = pack.content_items().unwrap_or(&empty);

        let policy = UploadExclusionPolicy::new(request.include_test_playbooks)
            .with_additional(request.excluded_content_types.iter().copied());
        let mut summary = DumpSummary::new(pack.pack_id().to_string(), request.destination.clone());
        let mut dumped_items: Vec<&ContentItem> = Vec::new();

        let total = items.len();
        for (index, item) in items.iter().enumerate() {
            self.progress_reporter
                .report_progress(index + 1, total, Some(item.object_id()));

            if let Some(reason) = Self::skip_reason(item, &policy, request.marketplace) {
                debug!(item = %item, %reason, "Skipping dump");
                summary.skip(item.item_ref(), reason);
                continue;
            }

            let dir = request.destination.join(Self::item_folder(item));
            match self.serializer.dump(item, &dir, request.marketplace) {
                Ok(path) => {
                    debug!(item = %item, path = %path.display(), "Dumped content item");
                    summary.dumped.push(item.item_ref());
                    dumped_items.push(item);
                }
                Err(ItemDumpError::MissingSource { path, .. }) => {
                    warn!(item = %item, path = %path.display(), "Content item source is missing, skipping");
                    summary.skip(item.item_ref(), SkipReason::MissingSource);
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.write_metadata(pack, graph, &dumped_items, request)?;
        self.write_readme(pack, request)?;
        self.copy_pack_files(pack, request, &mut summary)?;
        if pack.pack_id() == BASE_PACK {
            if let Some(documentation_dir) = &request.documentation_dir {
                self.copy_base_pack_docs(documentation_dir, request, &mut summary)?;
            }
        }
        if self.store.copy_tree(
            &pack.path().join(RELEASE_NOTES_DIR),
            &request.destination.join(RELEASE_NOTES_DIR),
        )? {
            summary.copied_files.push(RELEASE_NOTES_DIR.to_string());
        } else {
            debug!(pack = pack.pack_id(), "No release notes directory");
        }

        info!(
            pack = pack.pack_id(),
            dumped = summary.dumped.len(),
            skipped = summary.skipped.len(),
            "Dumped pack"
        );
        self.progress_reporter.report(&format!(
            "✅ Dumped {} content item(s) of pack {} ({} skipped)",
            summary.dumped.len(),
            pack.name(),
            summary.skipped.len()
        ));

        Ok(summary)
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    /// Why `item` is not dumped for `marketplace`, if it is not
    fn skip_reason(
        item: &ContentItem,
        policy: &UploadExclusionPolicy,
        marketplace: Marketplace,
    ) -> Option<SkipReason> {
        if policy.is_excluded(item.content_type()) {
            Some(SkipReason::ExcludedType)
        } else if !item.supports_marketplace(marketplace) {
            Some(SkipReason::MarketplaceMismatch)
        } else if !item.content_type().capabilities().dumpable {
            Some(SkipReason::NotDumpable)
        } else {
            None
        }
    }

    /// Output folder of an item; test scripts live with the test playbooks
    pub(crate) fn item_folder(item: &ContentItem) -> &'static str {
        if item.content_type() == ContentType::Script && item.is_test() {
            ContentType::TestPlaybook.output_folder()
        } else {
            item.content_type().output_folder()
        }
    }

    fn write_metadata(
        &self,
        pack: &Pack,
        graph: &ContentGraph,
        dumped_items: &[&ContentItem],
        request: &DumpRequest,
    ) -> Result<()> {
        let dependencies = pack.compute_dependencies(graph)?;
        let metadata = MetadataBuilder::build(
            pack,
            dumped_items.iter().copied(),
            &dependencies,
            request.marketplace,
        )?;
        let text = MetadataBuilder::to_pretty_json(&metadata)?;
        self.store
            .write_text(&request.destination.join(METADATA_FILENAME), &text)
    }

    fn write_readme(&self, pack: &Pack, request: &DumpRequest) -> Result<()> {
        let Some(readme) = self.store.read_text(&pack.path().join(README_FILENAME))? else {
            debug!(pack = pack.pack_id(), "No README.md");
            return Ok(());
        };

        let text = MetadataBuilder::append_contributors(&readme, pack.contributors());
        let updated = replace_marketplace_references(&text, request.marketplace);
        let marketplace = if request.marketplace == Marketplace::Xsoar
            && pack.supports(Marketplace::XsoarOnPrem)
        {
            Marketplace::XsoarOnPrem
        } else {
            request.marketplace
        };
        let parsed = MarketplaceTagParser::new(marketplace).parse_text(&updated);

        let output = if parsed.len() != text.len() {
            &parsed
        } else {
            &text
        };
        self.store
            .write_text(&request.destination.join(README_FILENAME), output)
    }

    fn copy_pack_files(
        &self,
        pack: &Pack,
        request: &DumpRequest,
        summary: &mut DumpSummary,
    ) -> Result<()> {
        for file_name in [
            PACK_METADATA_FILENAME,
            VERSION_CONFIG_FILENAME,
            AUTHOR_IMAGE_FILENAME,
        ] {
            if self.store.copy_file(
                &pack.path().join(file_name),
                &request.destination.join(file_name),
            )? {
                summary.copied_files.push(file_name.to_string());
            } else {
                debug!(pack = pack.pack_id(), file = file_name, "No such file");
            }
        }

        if self.store.copy_tree(
            &pack.path().join(DOC_FILES_DIR),
            &request.destination.join(DOC_FILES_DIR),
        )? {
            summary.copied_files.push(DOC_FILES_DIR.to_string());
        } else {
            debug!(pack = pack.pack_id(), "No doc_files directory");
        }
        Ok(())
    }

    fn copy_base_pack_docs(
        &self,
        documentation_dir: &Path,
        request: &DumpRequest,
        summary: &mut DumpSummary,
    ) -> Result<()> {
        let output = request.destination.join(DOCUMENTATION_DIR);
        self.store.create_dir(&output)?;

        let candidates: [PathBuf; 3] = [
            documentation_dir.join(format!("doc-howto-{}.json", request.marketplace)),
            documentation_dir.join("doc-howto-xsoar.json"),
            documentation_dir.join("doc-howto.json"),
        ];
        let mut copied = false;
        for candidate in &candidates {
            if self.store.copy_file(candidate, &output.join("doc-howto.json"))? {
                copied = true;
                break;
            }
        }
        if copied {
            summary
                .copied_files
                .push(format!("{}/doc-howto.json", DOCUMENTATION_DIR));
        } else {
            warn!(dir = %documentation_dir.display(), "No doc-howto file found for the Base pack");
        }

        if self.store.copy_file(
            &documentation_dir.join("doc-CommonServer.json"),
            &output.join("doc-CommonServer.json"),
        )? {
            summary
                .copied_files
                .push(format!("{}/doc-CommonServer.json", DOCUMENTATION_DIR));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;

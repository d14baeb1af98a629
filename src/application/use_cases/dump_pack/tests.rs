use super::*;
use crate::content_graph::domain::{ContentVersion, PackMetadata, Relationship, RelationshipKind};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

// Mock implementations for testing
#[derive(Default)]
struct MockItemSerializer {
    missing: BTreeSet<String>,
    broken: BTreeSet<String>,
    calls: RefCell<Vec<(String, PathBuf)>>,
}

impl ItemSerializer for MockItemSerializer {
    fn dump(
        &self,
        item: &ContentItem,
        dir: &Path,
        _marketplace: Marketplace,
    ) -> std::result::Result<PathBuf, ItemDumpError> {
        if self.missing.contains(item.object_id()) {
            return Err(ItemDumpError::MissingSource {
                item: item.to_string(),
                path: item.path().to_path_buf(),
            });
        }
        if self.broken.contains(item.object_id()) {
            return Err(ItemDumpError::Failed {
                item: item.to_string(),
                details: "malformed yaml".to_string(),
            });
        }
        self.calls
            .borrow_mut()
            .push((item.object_id().to_string(), dir.to_path_buf()));
        Ok(dir.join(item.normalize_name()))
    }
}

/// In-memory filesystem: files by path, directories as a set
#[derive(Default)]
struct MockArtifactStore {
    dirs: RefCell<BTreeSet<PathBuf>>,
    files: RefCell<BTreeMap<PathBuf, String>>,
}

impl MockArtifactStore {
    fn with_pack_dir(path: &str) -> Self {
        let store = Self::default();
        store.dirs.borrow_mut().insert(PathBuf::from(path));
        store
    }

    fn add_file(&self, path: &str, content: &str) {
        self.files
            .borrow_mut()
            .insert(PathBuf::from(path), content.to_string());
    }

    fn file(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Path::new(path)).cloned()
    }
}

impl ArtifactStore for MockArtifactStore {
    fn dir_exists(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        self.dirs.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }

    fn read_text(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<bool> {
        let content = self.files.borrow().get(from).cloned();
        match content {
            Some(content) => {
                self.files.borrow_mut().insert(to.to_path_buf(), content);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> Result<bool> {
        let entries: Vec<(PathBuf, String)> = self
            .files
            .borrow()
            .iter()
            .filter_map(|(path, content)| {
                path.strip_prefix(from)
                    .ok()
                    .map(|rel| (to.join(rel), content.clone()))
            })
            .collect();
        if entries.is_empty() {
            return Ok(false);
        }
        self.files.borrow_mut().extend(entries);
        Ok(true)
    }
}

#[derive(Default)]
struct MockProgressReporter {
    messages: RefCell<Vec<String>>,
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_warning(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}

const PACK_DIR: &str = "/content/Packs/HelloWorld";
const DEST: &str = "/out/HelloWorld";

fn item(id: &str, content_type: ContentType, marketplaces: &[Marketplace]) -> ContentItem {
    ContentItem::new(id.to_string(), content_type, String::new())
        .unwrap()
        .with_marketplaces(marketplaces.iter().copied())
        .with_path(PathBuf::from(format!("{PACK_DIR}/{id}.yml")))
}

fn graph_with(pack_id: &str, metadata: PackMetadata, items: Vec<ContentItem>) -> ContentGraph {
    let mut graph = ContentGraph::new();
    let node = ContentItem::new(pack_id.to_string(), ContentType::Pack, String::new())
        .unwrap()
        .with_path(PathBuf::from(PACK_DIR));
    let pack = graph.add_pack(node, metadata).unwrap();
    for item in items {
        let id = graph.add_node(item).unwrap();
        graph
            .add_relationship(Relationship::new(RelationshipKind::InPack, id, pack))
            .unwrap();
    }
    graph
}

fn sample_graph() -> ContentGraph {
    let both = [Marketplace::Xsoar, Marketplace::MarketplaceV2];
    graph_with(
        "HelloWorld",
        PackMetadata::new("Hello World"),
        vec![
            item("HelloScript", ContentType::Script, &both),
            item("XsoarOnly", ContentType::IncidentField, &[Marketplace::Xsoar]),
            item("HelloTest", ContentType::TestPlaybook, &both),
            item("CaseView", ContentType::CaseLayout, &both),
            item("Rule", ContentType::ParsingRule, &[Marketplace::MarketplaceV2]),
        ],
    )
}

fn use_case(
    serializer: MockItemSerializer,
    store: MockArtifactStore,
) -> DumpPackUseCase<MockItemSerializer, MockArtifactStore, MockProgressReporter> {
    DumpPackUseCase::new(serializer, store, MockProgressReporter::default())
}

fn dumped_ids(summary: &DumpSummary) -> Vec<&str> {
    summary
        .dumped
        .iter()
        .map(|i| i.object_id.as_str())
        .collect()
}

#[test]
fn test_dump_filters_by_marketplace_and_excluded_types() {
    let graph = sample_graph();
    let mut pack = Pack::load(&graph, "HelloWorld").unwrap();
    let use_case = use_case(MockItemSerializer::default(), MockArtifactStore::with_pack_dir(PACK_DIR));
    let request = DumpRequest::new(PathBuf::from(DEST), Marketplace::Xsoar);

    let summary = use_case.execute(&mut pack, &graph, &request).unwrap();

    assert_eq!(dumped_ids(&summary), vec!["HelloScript", "XsoarOnly", "CaseView"]);
    assert_eq!(
        summary
            .skipped_with(SkipReason::ExcludedType)
            .map(|i| i.object_id.as_str())
            .collect::<Vec<_>>(),
        vec!["HelloTest"]
    );
    assert_eq!(
        summary
            .skipped_with(SkipReason::MarketplaceMismatch)
            .map(|i| i.object_id.as_str())
            .collect::<Vec<_>>(),
        vec!["Rule"]
    );
}

#[test]
fn test_dump_includes_test_playbooks_when_requested() {
    let graph = sample_graph();
    let mut pack = Pack::load(&graph, "HelloWorld").unwrap();
    let use_case = use_case(MockItemSerializer::default(), MockArtifactStore::with_pack_dir(PACK_DIR));
    let request =
        DumpRequest::new(PathBuf::from(DEST), Marketplace::MarketplaceV2).with_test_playbooks(true);

    let summary = use_case.execute(&mut pack, &graph, &request).unwrap();

    assert_eq!(
        dumped_ids(&summary),
        vec!["HelloScript", "HelloTest", "CaseView", "Rule"]
    );
}

#[test]
fn test_dump_honors_configured_exclusions() {
    let graph = sample_graph();
    let mut pack = Pack::load(&graph, "HelloWorld").unwrap();
    let use_case = use_case(MockItemSerializer::default(), MockArtifactStore::with_pack_dir(PACK_DIR));
    let request = DumpRequest::new(PathBuf::from(DEST), Marketplace::Xsoar)
        .with_excluded_content_types(vec![ContentType::Script]);

    let summary = use_case.execute(&mut pack, &graph, &request).unwrap();
    assert_eq!(dumped_ids(&summary), vec!["XsoarOnly", "CaseView"]);
}

#[test]
fn test_dump_writes_case_layouts_and_test_scripts_to_renamed_folders() {
    let test_script = item("TestScript", ContentType::Script, &[Marketplace::Xsoar]).with_test_flag(true);
    let layout = item("CaseView", ContentType::CaseLayout, &[Marketplace::Xsoar]);
    let graph = graph_with("HelloWorld", PackMetadata::new("Hello World"), vec![test_script, layout]);
    let mut pack = Pack::load(&graph, "HelloWorld").unwrap();
    let use_case = use_case(MockItemSerializer::default(), MockArtifactStore::with_pack_dir(PACK_DIR));

    use_case
        .execute(&mut pack, &graph, &DumpRequest::new(PathBuf::from(DEST), Marketplace::Xsoar))
        .unwrap();

    let calls = use_case.serializer().calls.borrow().clone();
    assert_eq!(
        calls,
        vec![
            ("TestScript".to_string(), PathBuf::from(DEST).join("TestPlaybooks")),
            ("CaseView".to_string(), PathBuf::from(DEST).join("Layouts")),
        ]
    );
}

#[test]
fn test_dump_missing_pack_directory_is_fatal() {
    let graph = sample_graph();
    let mut pack = Pack::load(&graph, "HelloWorld").unwrap();
    let use_case = use_case(MockItemSerializer::default(), MockArtifactStore::default());

    let err = use_case
        .execute(&mut pack, &graph, &DumpRequest::new(PathBuf::from(DEST), Marketplace::Xsoar))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PackError>(),
        Some(PackError::PackSourceMissing { .. })
    ));
    assert!(use_case.serializer().calls.borrow().is_empty());
}

#[test]
fn test_dump_skips_items_with_missing_source() {
    let graph = sample_graph();
    let mut pack = Pack::load(&graph, "HelloWorld").unwrap();
    let serializer = MockItemSerializer {
        missing: ["HelloScript".to_string()].into_iter().collect(),
        ..Default::default()
    };
    let use_case = use_case(serializer, MockArtifactStore::with_pack_dir(PACK_DIR));

    let summary = use_case
        .execute(&mut pack, &graph, &DumpRequest::new(PathBuf::from(DEST), Marketplace::Xsoar))
        .unwrap();

    assert_eq!(dumped_ids(&summary), vec!["XsoarOnly", "CaseView"]);
    assert_eq!(summary.skipped_with(SkipReason::MissingSource).count(), 1);
}

#[test]
fn test_dump_aborts_on_other_item_errors() {
    let graph = sample_graph();
    let mut pack = Pack::load(&graph, "HelloWorld").unwrap();
    let serializer = MockItemSerializer {
        broken: ["XsoarOnly".to_string()].into_iter().collect(),
        ..Default::default()
    };
    let use_case = use_case(serializer, MockArtifactStore::with_pack_dir(PACK_DIR));

    let err = use_case
        .execute(&mut pack, &graph, &DumpRequest::new(PathBuf::from(DEST), Marketplace::Xsoar))
        .unwrap_err();
    assert!(err.to_string().contains("malformed yaml"));
}

#[test]
fn test_dump_writes_metadata_with_sorted_keys() {
    let graph = sample_graph();
    let mut pack = Pack::load(&graph, "HelloWorld").unwrap();
    let use_case = use_case(MockItemSerializer::default(), MockArtifactStore::with_pack_dir(PACK_DIR));

    use_case
        .execute(&mut pack, &graph, &DumpRequest::new(PathBuf::from(DEST), Marketplace::Xsoar))
        .unwrap();

    let metadata = use_case
        .store
        .file(&format!("{DEST}/metadata.json"))
        .expect("metadata.json written");
    let value: serde_json::Value = serde_json::from_str(&metadata).unwrap();
    assert_eq!(value["id"], "HelloWorld");
    assert_eq!(value["contentItems"]["automation"][0]["id"], "HelloScript");
    assert!(value["contentItems"].get("testplaybook").is_none());
    assert!(metadata.starts_with("{\n    \"author\""));
}

#[test]
fn test_dump_renders_readme_for_marketplace() {
    let mut metadata = PackMetadata::new("Hello World");
    metadata.contributors = vec!["Alice".to_string()];
    let graph = graph_with("HelloWorld", metadata, vec![]);
    let mut pack = Pack::load(&graph, "HelloWorld").unwrap();
    let store = MockArtifactStore::with_pack_dir(PACK_DIR);
    store.add_file(
        &format!("{PACK_DIR}/README.md"),
        "Works with Cortex XSOAR.<~XSOAR> Incidents.</~XSOAR><~XSIAM> Alerts.</~XSIAM>\n",
    );
    let use_case = use_case(MockItemSerializer::default(), store);

    use_case
        .execute(
            &mut pack,
            &graph,
            &DumpRequest::new(PathBuf::from(DEST), Marketplace::MarketplaceV2),
        )
        .unwrap();

    let readme = use_case.store.file(&format!("{DEST}/README.md")).unwrap();
    assert!(readme.starts_with("Works with Cortex. Alerts.\n"));
    assert!(readme.contains(" - Alice"));
}

#[test]
fn test_dump_readme_falls_back_to_on_prem_for_xsoar() {
    let mut metadata = PackMetadata::new("Hello World");
    metadata.marketplaces = vec![Marketplace::Xsoar, Marketplace::XsoarOnPrem];
    let graph = graph_with("HelloWorld", metadata, vec![]);
    let mut pack = Pack::load(&graph, "HelloWorld").unwrap();
    let store = MockArtifactStore::with_pack_dir(PACK_DIR);
    store.add_file(
        &format!("{PACK_DIR}/README.md"),
        "Intro<~XSOAR_ON_PREM> on prem</~XSOAR_ON_PREM>\n",
    );
    let use_case = use_case(MockItemSerializer::default(), store);

    use_case
        .execute(&mut pack, &graph, &DumpRequest::new(PathBuf::from(DEST), Marketplace::Xsoar))
        .unwrap();

    assert_eq!(
        use_case.store.file(&format!("{DEST}/README.md")).unwrap(),
        "Intro on prem\n"
    );
}

#[test]
fn test_dump_copies_optional_files_when_present() {
    let graph = sample_graph();
    let mut pack = Pack::load(&graph, "HelloWorld").unwrap();
    let store = MockArtifactStore::with_pack_dir(PACK_DIR);
    store.add_file(&format!("{PACK_DIR}/pack_metadata.json"), "{}");
    store.add_file(&format!("{PACK_DIR}/ReleaseNotes/1_0_1.md"), "fixed");
    let use_case = use_case(MockItemSerializer::default(), store);

    let summary = use_case
        .execute(&mut pack, &graph, &DumpRequest::new(PathBuf::from(DEST), Marketplace::Xsoar))
        .unwrap();

    assert_eq!(summary.copied_files, vec!["pack_metadata.json", "ReleaseNotes"]);
    assert_eq!(
        use_case.store.file(&format!("{DEST}/ReleaseNotes/1_0_1.md")).as_deref(),
        Some("fixed")
    );
    assert!(use_case.store.file(&format!("{DEST}/Author_image.png")).is_none());
}

#[test]
fn test_dump_base_pack_copies_marketplace_docs() {
    let graph = graph_with("Base", PackMetadata::new("Base"), vec![]);
    let mut pack = Pack::load(&graph, "Base").unwrap();
    let store = MockArtifactStore::with_pack_dir(PACK_DIR);
    store.add_file("/content/Documentation/doc-howto-xsoar.json", "xsoar docs");
    store.add_file("/content/Documentation/doc-howto.json", "generic docs");
    store.add_file("/content/Documentation/doc-CommonServer.json", "common");
    let use_case = use_case(MockItemSerializer::default(), store);
    let request = DumpRequest::new(PathBuf::from(DEST), Marketplace::MarketplaceV2)
        .with_documentation_dir(Some(PathBuf::from("/content/Documentation")));

    let summary = use_case.execute(&mut pack, &graph, &request).unwrap();

    assert_eq!(
        use_case
            .store
            .file(&format!("{DEST}/Documentation/doc-howto.json"))
            .as_deref(),
        Some("xsoar docs")
    );
    assert!(summary
        .copied_files
        .contains(&"Documentation/doc-CommonServer.json".to_string()));
}

#[test]
fn test_dump_uses_derived_minimum_version_in_metadata() {
    let script = item("New", ContentType::Script, &[Marketplace::Xsoar])
        .with_versions(Some(ContentVersion::new(6, 9, 0)), None);
    let graph = graph_with("HelloWorld", PackMetadata::new("Hello World"), vec![script]);
    let mut pack = Pack::load(&graph, "HelloWorld").unwrap();
    let use_case = use_case(MockItemSerializer::default(), MockArtifactStore::with_pack_dir(PACK_DIR));

    use_case
        .execute(&mut pack, &graph, &DumpRequest::new(PathBuf::from(DEST), Marketplace::Xsoar))
        .unwrap();

    let metadata = use_case.store.file(&format!("{DEST}/metadata.json")).unwrap();
    assert!(metadata.contains("\"serverMinVersion\": \"6.9.0\""));
}

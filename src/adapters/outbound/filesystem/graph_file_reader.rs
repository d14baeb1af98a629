use crate::content_graph::domain::{
    ContentGraph, ContentItem, ContentType, ContentVersion, Marketplace, PackMetadata,
    Relationship, RelationshipKind,
};
use crate::ports::outbound::GraphReader;
use crate::shared::error::PackError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_GRAPH_FILE_SIZE};
use crate::shared::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PACK_METADATA_FILENAME: &str = "pack_metadata.json";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GraphDocument {
    #[serde(default)]
    packs: Vec<PackEntry>,
    #[serde(default)]
    items: Vec<ItemEntry>,
    #[serde(default)]
    relationships: Vec<RelationshipEntry>,
}

#[derive(Debug, Deserialize)]
struct PackEntry {
    id: String,
    path: PathBuf,
    /// Inline metadata; read from the pack's `pack_metadata.json` when absent
    #[serde(default)]
    metadata: Option<PackMetadata>,
}

#[derive(Debug, Deserialize)]
struct ItemEntry {
    content_type: ContentType,
    object_id: String,
    #[serde(default)]
    name: String,
    path: PathBuf,
    #[serde(default)]
    marketplaces: Vec<Marketplace>,
    #[serde(default, alias = "fromversion")]
    from_version: Option<String>,
    #[serde(default, alias = "toversion")]
    to_version: Option<String>,
    #[serde(default)]
    is_test: bool,
}

#[derive(Debug, Deserialize)]
struct NodeRef {
    content_type: ContentType,
    object_id: String,
}

#[derive(Debug, Deserialize)]
struct RelationshipEntry {
    kind: RelationshipKind,
    source: NodeRef,
    target: NodeRef,
    #[serde(default = "default_true")]
    is_direct: bool,
    #[serde(default)]
    mandatorily: bool,
}

fn default_true() -> bool {
    true
}

/// GraphFileReader adapter for loading a content graph export from disk
///
/// The export is JSON, or YAML for `.yml`/`.yaml` files. Relative source
/// paths resolve against the content root.
pub struct GraphFileReader;

impl GraphFileReader {
    pub fn new() -> Self {
        Self
    }

    fn parse(path: &Path, content: &str) -> Result<GraphDocument> {
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

        let parsed: std::result::Result<GraphDocument, String> = if is_yaml {
            serde_yaml_ng::from_str(content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(content).map_err(|e| e.to_string())
        };
        parsed.map_err(|details| {
            PackError::GraphParseError {
                path: path.to_path_buf(),
                details,
            }
            .into()
        })
    }

    fn resolve(content_root: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            content_root.join(path)
        }
    }

    fn pack_metadata(entry: &PackEntry, pack_path: &Path) -> Result<PackMetadata> {
        if let Some(metadata) = &entry.metadata {
            return Ok(metadata.clone());
        }

        let metadata_path = pack_path.join(PACK_METADATA_FILENAME);
        if !metadata_path.is_file() {
            debug!(pack = %entry.id, "No pack_metadata.json, using defaults");
            return Ok(PackMetadata::new(entry.id.clone()));
        }
        validate_regular_file(&metadata_path, PACK_METADATA_FILENAME)?;
        let content = fs::read_to_string(&metadata_path).map_err(|e| PackError::FileReadError {
            path: metadata_path.clone(),
            details: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| {
            PackError::GraphParseError {
                path: metadata_path,
                details: e.to_string(),
            }
            .into()
        })
    }

    fn version(raw: Option<&str>, item: &str) -> Result<Option<ContentVersion>> {
        raw.map(|raw| {
            ContentVersion::parse(raw)
                .map_err(|e| anyhow::anyhow!("Invalid version on {}: {}", item, e))
        })
        .transpose()
    }

    fn node_id(
        graph: &ContentGraph,
        node: &NodeRef,
    ) -> Result<crate::content_graph::domain::NodeId> {
        graph.find(node.content_type, &node.object_id).ok_or_else(|| {
            PackError::NodeNotFound {
                node: format!("{} {}", node.content_type, node.object_id),
            }
            .into()
        })
    }

    fn build(document: GraphDocument, content_root: &Path) -> Result<ContentGraph> {
        let mut graph = ContentGraph::new();

        for entry in &document.packs {
            let path = Self::resolve(content_root, &entry.path);
            let metadata = Self::pack_metadata(entry, &path)?;
            let node = ContentItem::new(entry.id.clone(), ContentType::Pack, metadata.name.clone())?
                .with_marketplaces(metadata.marketplaces.iter().copied())
                .with_path(path);
            graph.add_pack(node, metadata)?;
        }

        for entry in document.items {
            if entry.content_type == ContentType::Pack {
                warn!(item = %entry.object_id, "Pack listed under items, declare it under packs");
                continue;
            }
            let label = format!("{} {}", entry.content_type, entry.object_id);
            let from_version = Self::version(entry.from_version.as_deref(), &label)?;
            let to_version = Self::version(entry.to_version.as_deref(), &label)?;
            let item = ContentItem::new(entry.object_id, entry.content_type, entry.name)?
                .with_marketplaces(entry.marketplaces)
                .with_versions(from_version, to_version)
                .with_path(Self::resolve(content_root, &entry.path))
                .with_test_flag(entry.is_test);
            graph.add_node(item)?;
        }

        for entry in document.relationships {
            let source = Self::node_id(&graph, &entry.source)?;
            let target = Self::node_id(&graph, &entry.target)?;
            graph.add_relationship(
                Relationship::new(entry.kind, source, target)
                    .with_direct(entry.is_direct)
                    .with_mandatorily(entry.mandatorily),
            )?;
        }

        debug!(
            nodes = graph.node_count(),
            relationships = graph.relationship_count(),
            "Loaded content graph"
        );
        Ok(graph)
    }
}

impl Default for GraphFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphReader for GraphFileReader {
    fn read_graph(&self, graph_path: &Path, content_root: &Path) -> Result<ContentGraph> {
        if !graph_path.exists() {
            return Err(PackError::GraphFileNotFound {
                path: graph_path.to_path_buf(),
                suggestion: "Export the content graph to JSON or YAML and pass its path as the first argument".to_string(),
            }
            .into());
        }

        validate_regular_file(graph_path, "Graph file")?;
        let metadata = fs::metadata(graph_path).map_err(|e| PackError::FileReadError {
            path: graph_path.to_path_buf(),
            details: e.to_string(),
        })?;
        validate_file_size(metadata.len(), graph_path, MAX_GRAPH_FILE_SIZE)?;

        let content = fs::read_to_string(graph_path).map_err(|e| PackError::FileReadError {
            path: graph_path.to_path_buf(),
            details: e.to_string(),
        })?;
        let document = Self::parse(graph_path, &content)?;
        Self::build(document, content_root)
    }
}

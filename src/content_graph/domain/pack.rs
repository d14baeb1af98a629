use super::{
    ContentGraph, ContentItem, ContentType, ContentVersion, Marketplace, NodeId,
    PackContentItems, PackMetadata, RelationshipKind,
};
use crate::shared::error::PackError;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// A direct dependency of a pack, read from a `DEPENDS_ON` edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackDependency {
    pub pack_id: String,
    pub display_name: String,
    pub mandatory: bool,
    pub is_direct: bool,
}

/// Pack aggregate root
///
/// Content-item membership and the minimum supported version are derived
/// from the graph on first use and cached until [`Pack::invalidate`].
#[derive(Debug, Clone)]
pub struct Pack {
    node_id: NodeId,
    pack_id: String,
    path: PathBuf,
    metadata: PackMetadata,
    floor: ContentVersion,
    content_items: Option<PackContentItems>,
    minimum_supported_version: ContentVersion,
}

impl Pack {
    /// Builds the aggregate for `pack_id` from its graph node
    ///
    /// # Errors
    /// Returns `PackError::PackNotFound` if the graph has no such pack
    pub fn load(graph: &ContentGraph, pack_id: &str) -> Result<Self> {
        let node_id = graph
            .find(ContentType::Pack, pack_id)
            .ok_or_else(|| PackError::PackNotFound {
                pack_id: pack_id.to_string(),
                suggestion: suggest_pack(graph, pack_id),
            })?;
        let node = graph.node(node_id)?;
        let metadata = graph.pack_metadata(node_id).cloned().unwrap_or_default();

        let floor = ContentVersion::marketplace_floor();
        let minimum_supported_version = Self::clamp(metadata.server_min_version.clone(), &floor);

        Ok(Self {
            node_id,
            pack_id: pack_id.to_string(),
            path: node.path().to_path_buf(),
            metadata,
            floor,
            content_items: None,
            minimum_supported_version,
        })
    }

    /// Replaces the marketplace floor used for the minimum version
    pub fn with_floor(mut self, floor: ContentVersion) -> Self {
        self.minimum_supported_version =
            Self::clamp(self.metadata.server_min_version.clone(), &floor);
        self.floor = floor;
        self.content_items = None;
        self
    }

    /// Collects the items holding an `IN_PACK` edge to this pack and derives
    /// the minimum supported version from them
    ///
    /// Recomputes on every call; the result only depends on the graph.
    pub fn compute_content_items(&mut self, graph: &ContentGraph) -> Result<&PackContentItems> {
        let mut items = PackContentItems::new();
        for relationship in graph.incoming(self.node_id, RelationshipKind::InPack)? {
            let item = graph.node(relationship.source())?;
            if item.content_type() == ContentType::Pack {
                continue;
            }
            items.push(item.clone());
        }

        let derived = self
            .metadata
            .server_min_version
            .clone()
            .or_else(|| Self::minimum_item_version(items.iter()));
        self.minimum_supported_version = Self::clamp(derived, &self.floor);

        Ok(self.content_items.insert(items))
    }

    /// Returns the cached content items, computing them on first use
    pub fn ensure_content_items(&mut self, graph: &ContentGraph) -> Result<&PackContentItems> {
        if self.content_items.is_none() {
            self.compute_content_items(graph)?;
        }
        match &self.content_items {
            Some(items) => Ok(items),
            None => anyhow::bail!("Content items of pack {} were not computed", self.pack_id),
        }
    }

    /// Drops the cached content items, as a graph reload would
    pub fn invalidate(&mut self) {
        self.content_items = None;
        self.minimum_supported_version =
            Self::clamp(self.metadata.server_min_version.clone(), &self.floor);
    }

    /// Direct dependencies from outgoing `DEPENDS_ON` edges
    ///
    /// Transitive resolution is left to callers.
    pub fn compute_dependencies(&self, graph: &ContentGraph) -> Result<Vec<PackDependency>> {
        graph
            .outgoing(self.node_id, RelationshipKind::DependsOn)?
            .into_iter()
            .map(|relationship| -> Result<PackDependency> {
                let target = graph.node(relationship.target())?;
                let display_name = graph
                    .pack_metadata(relationship.target())
                    .map(|m| m.name.clone())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| target.name().to_string());
                Ok(PackDependency {
                    pack_id: target.object_id().to_string(),
                    display_name,
                    mandatory: relationship.mandatorily(),
                    is_direct: relationship.is_direct(),
                })
            })
            .collect()
    }

    fn minimum_item_version<'a>(
        items: impl Iterator<Item = &'a ContentItem>,
    ) -> Option<ContentVersion> {
        items
            .filter(|item| !item.is_test() && !item.from_version().is_default_from())
            .map(|item| item.from_version().clone())
            .min()
    }

    fn clamp(version: Option<ContentVersion>, floor: &ContentVersion) -> ContentVersion {
        match version {
            Some(v) if v > *floor => v,
            _ => floor.clone(),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn pack_id(&self) -> &str {
        &self.pack_id
    }

    /// Display name, falling back to the pack id
    pub fn name(&self) -> &str {
        if self.metadata.name.is_empty() {
            &self.pack_id
        } else {
            &self.metadata.name
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &PackMetadata {
        &self.metadata
    }

    pub fn content_items(&self) -> Option<&PackContentItems> {
        self.content_items.as_ref()
    }

    pub fn minimum_supported_version(&self) -> &ContentVersion {
        &self.minimum_supported_version
    }

    pub fn is_private(&self) -> bool {
        self.metadata.is_premium()
    }

    /// Current version of the pack, if it declares a valid one
    pub fn pack_version(&self) -> Option<ContentVersion> {
        ContentVersion::parse(&self.metadata.current_version).ok()
    }

    pub fn supports(&self, marketplace: Marketplace) -> bool {
        self.metadata.marketplaces.contains(&marketplace)
    }

    pub fn contributors(&self) -> &[String] {
        &self.metadata.contributors
    }
}

fn suggest_pack(graph: &ContentGraph, pack_id: &str) -> String {
    let needle = pack_id.to_lowercase();
    match graph
        .packs()
        .map(|p| p.object_id())
        .find(|id| id.to_lowercase() == needle || id.to_lowercase().contains(&needle))
    {
        Some(candidate) => format!("Did you mean '{}'?", candidate),
        None => "Check the pack id against the graph export".to_string(),
    }
}

use super::{ContentItem, ContentType, NodeId, PackMetadata, Relationship, RelationshipKind};
use crate::shared::error::PackError;
use crate::shared::Result;
use std::collections::HashMap;

/// In-memory content graph with explicit directed edges
///
/// Every relationship is stored once and indexed twice, by source and by
/// target, so direction is a property of the query rather than something
/// callers reconstruct from node identities.
#[derive(Debug, Default)]
pub struct ContentGraph {
    nodes: Vec<ContentItem>,
    index: HashMap<(ContentType, String), NodeId>,
    pack_metadata: HashMap<NodeId, PackMetadata>,
    relationships: Vec<Relationship>,
    by_source: HashMap<NodeId, Vec<usize>>,
    by_target: HashMap<NodeId, Vec<usize>>,
}

impl ContentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its database identity
    ///
    /// # Errors
    /// Returns `PackError::DuplicateNode` if a node with the same content type
    /// and object id already exists
    pub fn add_node(&mut self, mut item: ContentItem) -> Result<NodeId> {
        let key = (item.content_type(), item.object_id().to_string());
        if self.index.contains_key(&key) {
            return Err(PackError::DuplicateNode {
                node: format!("{}:{}", key.0, key.1),
            }
            .into());
        }

        let id = NodeId::from_index(self.nodes.len());
        item.assign_database_id(id);
        self.nodes.push(item);
        self.index.insert(key, id);
        Ok(id)
    }

    /// Adds a pack node together with its metadata
    ///
    /// # Errors
    /// Returns an error if `node` is not of type `Pack` or is a duplicate
    pub fn add_pack(&mut self, node: ContentItem, metadata: PackMetadata) -> Result<NodeId> {
        if node.content_type() != ContentType::Pack {
            return Err(PackError::Validation {
                message: format!("{} is not a pack node", node),
            }
            .into());
        }
        let id = self.add_node(node)?;
        self.pack_metadata.insert(id, metadata);
        Ok(id)
    }

    /// Adds a relationship between two existing nodes
    ///
    /// An `IN_PACK` edge also sets the pack back-reference of its source item.
    ///
    /// # Errors
    /// Returns `PackError::NodeNotFound` if either endpoint is unknown, and a
    /// validation error if an `IN_PACK` edge does not point at a pack
    pub fn add_relationship(&mut self, relationship: Relationship) -> Result<()> {
        self.require(relationship.source())?;
        let target = self.require(relationship.target())?;

        if relationship.kind() == RelationshipKind::InPack {
            if target.content_type() != ContentType::Pack {
                return Err(PackError::Validation {
                    message: format!("IN_PACK target {} is not a pack", target),
                }
                .into());
            }
            let pack = relationship.target();
            self.nodes[relationship.source().index()].assign_pack(pack);
        }

        let position = self.relationships.len();
        self.by_source
            .entry(relationship.source())
            .or_default()
            .push(position);
        self.by_target
            .entry(relationship.target())
            .or_default()
            .push(position);
        self.relationships.push(relationship);
        Ok(())
    }

    /// Every edge of `kind` touching `node`, in either direction, in insertion order
    ///
    /// # Errors
    /// Returns `PackError::NodeNotFound` only if `node` is absent
    pub fn edges_of_type(&self, node: NodeId, kind: RelationshipKind) -> Result<Vec<&Relationship>> {
        self.require(node)?;
        let mut positions: Vec<usize> = self
            .positions(&self.by_source, node)
            .chain(self.positions(&self.by_target, node))
            .collect();
        positions.sort_unstable();
        positions.dedup();

        Ok(positions
            .into_iter()
            .map(|p| &self.relationships[p])
            .filter(|r| r.kind() == kind)
            .collect())
    }

    /// Edges of `kind` whose recorded source is `node`
    pub fn outgoing(&self, node: NodeId, kind: RelationshipKind) -> Result<Vec<&Relationship>> {
        self.require(node)?;
        Ok(self
            .positions(&self.by_source, node)
            .map(|p| &self.relationships[p])
            .filter(|r| r.kind() == kind)
            .collect())
    }

    /// Edges of `kind` whose recorded target is `node`
    pub fn incoming(&self, node: NodeId, kind: RelationshipKind) -> Result<Vec<&Relationship>> {
        self.require(node)?;
        Ok(self
            .positions(&self.by_target, node)
            .map(|p| &self.relationships[p])
            .filter(|r| r.kind() == kind)
            .collect())
    }

    /// Items importing `script` (integrations holding an `IMPORTS` edge to it)
    pub fn imported_by(&self, script: NodeId) -> Result<Vec<&ContentItem>> {
        self.incoming(script, RelationshipKind::Imports)?
            .into_iter()
            .map(|r| self.node(r.source()))
            .collect()
    }

    pub fn find(&self, content_type: ContentType, object_id: &str) -> Option<NodeId> {
        self.index
            .get(&(content_type, object_id.to_string()))
            .copied()
    }

    /// Looks up a node by identity
    ///
    /// # Errors
    /// Returns `PackError::NodeNotFound` for an identity from another graph
    pub fn node(&self, id: NodeId) -> Result<&ContentItem> {
        Ok(self.require(id)?)
    }

    pub fn pack_metadata(&self, id: NodeId) -> Option<&PackMetadata> {
        self.pack_metadata.get(&id)
    }

    /// Pack nodes in insertion order
    pub fn packs(&self) -> impl Iterator<Item = &ContentItem> {
        self.nodes
            .iter()
            .filter(|n| n.content_type() == ContentType::Pack)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    fn require(&self, id: NodeId) -> std::result::Result<&ContentItem, PackError> {
        self.nodes.get(id.index()).ok_or_else(|| PackError::NodeNotFound {
            node: id.to_string(),
        })
    }

    fn positions<'a>(
        &'a self,
        index: &'a HashMap<NodeId, Vec<usize>>,
        node: NodeId,
    ) -> impl Iterator<Item = usize> + 'a {
        index.get(&node).into_iter().flatten().copied()
    }
}

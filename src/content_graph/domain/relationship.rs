use super::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a typed edge in the content graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipKind {
    /// content item -> pack
    InPack,
    /// pack -> pack it depends on
    DependsOn,
    /// integration -> imported script
    Imports,
    Uses,
    TestedBy,
    HasCommand,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::InPack => "IN_PACK",
            RelationshipKind::DependsOn => "DEPENDS_ON",
            RelationshipKind::Imports => "IMPORTS",
            RelationshipKind::Uses => "USES",
            RelationshipKind::TestedBy => "TESTED_BY",
            RelationshipKind::HasCommand => "HAS_COMMAND",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, typed edge between two nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    kind: RelationshipKind,
    source: NodeId,
    target: NodeId,
    is_direct: bool,
    mandatorily: bool,
}

impl Relationship {
    /// Creates a direct, non-mandatory relationship
    pub fn new(kind: RelationshipKind, source: NodeId, target: NodeId) -> Self {
        Self {
            kind,
            source,
            target,
            is_direct: true,
            mandatorily: false,
        }
    }

    pub fn with_direct(mut self, is_direct: bool) -> Self {
        self.is_direct = is_direct;
        self
    }

    pub fn with_mandatorily(mut self, mandatorily: bool) -> Self {
        self.mandatorily = mandatorily;
        self
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn is_direct(&self) -> bool {
        self.is_direct
    }

    pub fn mandatorily(&self) -> bool {
        self.mandatorily
    }

    pub fn is_source(&self, node: NodeId) -> bool {
        self.source == node
    }

    pub fn is_target(&self, node: NodeId) -> bool {
        self.target == node
    }

    /// The endpoint that is not `node`, or `None` if `node` is not an endpoint
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if self.is_source(node) {
            Some(self.target)
        } else if self.is_target(node) {
            Some(self.source)
        } else {
            None
        }
    }
}

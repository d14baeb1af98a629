use super::{ContentType, ContentVersion, ItemRef, Marketplace};
use crate::shared::Result;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum length for object ids (security limit)
const MAX_OBJECT_ID_LENGTH: usize = 255;

/// Stable database identity of a node inside one loaded graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A content item node in the content graph
///
/// Items are immutable once added to a graph, except for the pack
/// back-reference which is set when an `IN_PACK` relationship is added.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    database_id: Option<NodeId>,
    object_id: String,
    content_type: ContentType,
    name: String,
    marketplaces: BTreeSet<Marketplace>,
    from_version: ContentVersion,
    to_version: ContentVersion,
    path: PathBuf,
    is_test: bool,
    pack: Option<NodeId>,
}

impl ContentItem {
    /// Creates a new content item with default version bounds and no marketplaces
    ///
    /// # Errors
    /// Returns an error if the object id is empty, too long, or contains
    /// control characters
    pub fn new(object_id: String, content_type: ContentType, name: String) -> Result<Self> {
        if object_id.trim().is_empty() {
            anyhow::bail!("Content item id cannot be empty");
        }
        if object_id.len() > MAX_OBJECT_ID_LENGTH {
            anyhow::bail!(
                "Content item id is too long ({} bytes). Maximum allowed: {} bytes",
                object_id.len(),
                MAX_OBJECT_ID_LENGTH
            );
        }
        if object_id.chars().any(|c| c.is_control()) {
            anyhow::bail!("Content item id contains control characters: {:?}", object_id);
        }

        let name = if name.trim().is_empty() {
            object_id.clone()
        } else {
            name
        };

        Ok(Self {
            database_id: None,
            object_id,
            content_type,
            name,
            marketplaces: BTreeSet::new(),
            from_version: ContentVersion::default_from(),
            to_version: ContentVersion::default_to(),
            path: PathBuf::new(),
            is_test: false,
            pack: None,
        })
    }

    pub fn with_marketplaces(mut self, marketplaces: impl IntoIterator<Item = Marketplace>) -> Self {
        self.marketplaces = marketplaces.into_iter().collect();
        self
    }

    /// Sets the version bounds, back-filling missing ones with the defaults
    pub fn with_versions(
        mut self,
        from_version: Option<ContentVersion>,
        to_version: Option<ContentVersion>,
    ) -> Self {
        self.from_version = from_version.unwrap_or_else(ContentVersion::default_from);
        self.to_version = to_version.unwrap_or_else(ContentVersion::default_to);
        self
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    pub fn with_test_flag(mut self, is_test: bool) -> Self {
        self.is_test = is_test;
        self
    }

    pub(crate) fn assign_database_id(&mut self, id: NodeId) {
        self.database_id = Some(id);
    }

    pub(crate) fn assign_pack(&mut self, pack: NodeId) {
        self.pack = Some(pack);
    }

    /// Identity inside the graph, `None` until the item is added to one
    pub fn database_id(&self) -> Option<NodeId> {
        self.database_id
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn marketplaces(&self) -> &BTreeSet<Marketplace> {
        &self.marketplaces
    }

    pub fn supports_marketplace(&self, marketplace: Marketplace) -> bool {
        self.marketplaces.contains(&marketplace)
    }

    pub fn from_version(&self) -> &ContentVersion {
        &self.from_version
    }

    pub fn to_version(&self) -> &ContentVersion {
        &self.to_version
    }

    /// Whether the item can be installed on a platform running `target`
    pub fn supports_version(&self, target: &ContentVersion) -> bool {
        self.from_version <= *target && *target <= self.to_version
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_test(&self) -> bool {
        self.is_test
    }

    pub fn pack(&self) -> Option<NodeId> {
        self.pack
    }

    /// File name the item is written under, prefixed by its type
    ///
    /// Source files already carrying the prefix keep their name.
    pub fn normalize_name(&self) -> String {
        let prefix = self.content_type.capabilities().file_prefix;
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.yml", self.object_id));

        if file_name.starts_with(&format!("{}-", prefix)) {
            file_name
        } else {
            format!("{}-{}", prefix, file_name)
        }
    }

    pub fn item_ref(&self) -> ItemRef {
        ItemRef::new(self.content_type, self.object_id.clone(), self.path.clone())
    }
}

impl fmt::Display for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.content_type, self.object_id)
    }
}

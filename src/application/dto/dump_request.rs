use crate::content_graph::domain::{ContentType, Marketplace};
use std::path::PathBuf;

/// DumpRequest - Input of the dump use case
#[derive(Debug, Clone)]
pub struct DumpRequest {
    /// Directory the pack is written to (created if missing)
    pub destination: PathBuf,
    /// Target marketplace; items not supporting it are skipped
    pub marketplace: Marketplace,
    /// Re-include test playbooks, which are excluded by default
    pub include_test_playbooks: bool,
    /// Content types excluded in addition to the defaults
    pub excluded_content_types: Vec<ContentType>,
    /// Content repository `Documentation` directory, used for the Base pack
    pub documentation_dir: Option<PathBuf>,
}

impl DumpRequest {
    pub fn new(destination: PathBuf, marketplace: Marketplace) -> Self {
        Self {
            destination,
            marketplace,
            include_test_playbooks: false,
            excluded_content_types: Vec::new(),
            documentation_dir: None,
        }
    }

    pub fn with_test_playbooks(mut self, include: bool) -> Self {
        self.include_test_playbooks = include;
        self
    }

    pub fn with_excluded_content_types(mut self, types: Vec<ContentType>) -> Self {
        self.excluded_content_types = types;
        self
    }

    pub fn with_documentation_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.documentation_dir = dir;
        self
    }
}

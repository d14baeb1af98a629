use crate::content_graph::domain::{ContentType, ContentVersion, Marketplace};
use std::path::PathBuf;

/// UploadRequest - Input of the pack upload use case
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub marketplace: Marketplace,
    /// Version of the platform receiving the upload
    pub target_version: ContentVersion,
    /// Upload one zipped bundle instead of item by item
    pub zip: bool,
    pub include_test_playbooks: bool,
    /// Ask the platform to skip validation (honored from 6.6.0)
    pub skip_validation: bool,
    /// Where `uploadable_packs.zip` is written in bundle mode
    pub destination_zip_dir: Option<PathBuf>,
    pub excluded_content_types: Vec<ContentType>,
    pub documentation_dir: Option<PathBuf>,
}

impl UploadRequest {
    pub fn new(marketplace: Marketplace, target_version: ContentVersion) -> Self {
        Self {
            marketplace,
            target_version,
            zip: false,
            include_test_playbooks: false,
            skip_validation: false,
            destination_zip_dir: None,
            excluded_content_types: Vec::new(),
            documentation_dir: None,
        }
    }

    pub fn zipped(mut self, zip: bool) -> Self {
        self.zip = zip;
        self
    }

    pub fn with_test_playbooks(mut self, include: bool) -> Self {
        self.include_test_playbooks = include;
        self
    }

    pub fn with_skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }

    pub fn with_destination_zip_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.destination_zip_dir = dir;
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

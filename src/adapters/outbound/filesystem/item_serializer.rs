use crate::content_graph::domain::{ContentItem, Marketplace};
use crate::content_graph::services::{replace_marketplace_references, MarketplaceTagParser};
use crate::ports::outbound::{ItemDumpError, ItemSerializer};
use crate::shared::security::is_contained_relative_path;
use std::fs;
use std::path::{Path, PathBuf};

/// FileSystemItemSerializer adapter for writing content items to disk
///
/// Text sources are written with marketplace tags resolved and references
/// rewritten for the target marketplace. Anything that is not UTF-8 is
/// copied as is.
pub struct FileSystemItemSerializer;

impl FileSystemItemSerializer {
    pub fn new() -> Self {
        Self
    }

    fn failed(item: &ContentItem, details: impl Into<String>) -> ItemDumpError {
        ItemDumpError::Failed {
            item: item.to_string(),
            details: details.into(),
        }
    }
}

impl Default for FileSystemItemSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemSerializer for FileSystemItemSerializer {
    fn dump(
        &self,
        item: &ContentItem,
        dir: &Path,
        marketplace: Marketplace,
    ) -> Result<PathBuf, ItemDumpError> {
        let source = item.path();
        let metadata = match fs::symlink_metadata(source) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ItemDumpError::MissingSource {
                    item: item.to_string(),
                    path: source.to_path_buf(),
                })
            }
            Err(e) => return Err(Self::failed(item, e.to_string())),
        };
        if metadata.is_symlink() {
            return Err(Self::failed(
                item,
                format!("Security: {} is a symbolic link", source.display()),
            ));
        }
        if !metadata.is_file() {
            return Err(Self::failed(
                item,
                format!("{} is not a regular file", source.display()),
            ));
        }

        let file_name = item.normalize_name();
        if !is_contained_relative_path(Path::new(&file_name)) {
            return Err(Self::failed(
                item,
                format!("Unsafe output file name: {}", file_name),
            ));
        }
        fs::create_dir_all(dir).map_err(|e| {
            Self::failed(item, format!("Failed to create {}: {}", dir.display(), e))
        })?;
        let destination = dir.join(&file_name);

        let bytes = fs::read(source).map_err(|e| Self::failed(item, e.to_string()))?;
        match String::from_utf8(bytes) {
            Ok(text) => {
                let rewritten = replace_marketplace_references(&text, marketplace);
                let parsed = MarketplaceTagParser::new(marketplace).parse_text(&rewritten);
                fs::write(&destination, parsed)
            }
            Err(_) => fs::copy(source, &destination).map(|_| ()),
        }
        .map_err(|e| {
            Self::failed(
                item,
                format!("Failed to write {}: {}", destination.display(), e),
            )
        })?;

        Ok(destination)
    }
}

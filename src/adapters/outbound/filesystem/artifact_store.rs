use crate::ports::outbound::ArtifactStore;
use crate::shared::error::PackError;
use crate::shared::security::validate_destination;
use crate::shared::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// FileSystemArtifactStore adapter for pack-level files of a dump
///
/// Writes refuse to go through symbolic links, and tree copies skip
/// symbolic links found in the source.
pub struct FileSystemArtifactStore;

impl FileSystemArtifactStore {
    pub fn new() -> Self {
        Self
    }

    fn write_error(path: &Path, e: impl std::fmt::Display) -> anyhow::Error {
        PackError::FileWriteError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if parent != Path::new("") {
                fs::create_dir_all(parent).map_err(|e| Self::write_error(parent, e))?;
            }
        }
        Ok(())
    }
}

impl Default for FileSystemArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactStore for FileSystemArtifactStore {
    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        validate_destination(path)?;
        fs::create_dir_all(path).map_err(|e| Self::write_error(path, e))
    }

    fn read_text(&self, path: &Path) -> Result<Option<String>> {
        if !path.is_file() {
            return Ok(None);
        }
        fs::read_to_string(path).map(Some).map_err(|e| {
            PackError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        validate_destination(path)?;
        Self::ensure_parent(path)?;
        fs::write(path, content).map_err(|e| Self::write_error(path, e))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<bool> {
        if !from.is_file() {
            return Ok(false);
        }
        validate_destination(to)?;
        Self::ensure_parent(to)?;
        fs::copy(from, to).map_err(|e| Self::write_error(to, e))?;
        Ok(true)
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> Result<bool> {
        if !from.is_dir() {
            return Ok(false);
        }
        validate_destination(to)?;

        for entry in WalkDir::new(from).follow_links(false) {
            let entry = entry.map_err(|e| PackError::FileReadError {
                path: from.to_path_buf(),
                details: e.to_string(),
            })?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| Self::write_error(entry.path(), e))?;
            let target = to.join(relative);

            let file_type = entry.file_type();
            if file_type.is_dir() {
                fs::create_dir_all(&target).map_err(|e| Self::write_error(&target, e))?;
            } else if file_type.is_file() {
                fs::copy(entry.path(), &target).map_err(|e| Self::write_error(&target, e))?;
            } else {
                tracing::debug!(path = %entry.path().display(), "Skipping non-regular file");
            }
        }
        Ok(true)
    }
}

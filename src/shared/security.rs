use crate::shared::error::PackError;
use crate::shared::Result;
use std::fs;
use std::path::{Component, Path};

/// Maximum size of a graph export we are willing to load (256 MB)
pub const MAX_GRAPH_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// Uses `symlink_metadata()` so the symlink itself is inspected rather than
/// the file it points to.
///
/// # Errors
/// Returns an error if the path is missing, a symbolic link, or not a file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| PackError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(PackError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Pass the real file path instead of a link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(PackError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes",
                file_size, max_size
            ),
            hint: "Export a smaller graph (for example, filter to the packs you need)".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Rejects destinations that are symbolic links.
///
/// A missing path is fine: the dump creates it.
pub fn validate_destination(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => Err(PackError::SecurityError {
            path: path.to_path_buf(),
            reason: "Destination is a symbolic link".to_string(),
            hint: "Choose a real directory as the dump destination".to_string(),
        }
        .into()),
        _ => Ok(()),
    }
}

/// Checks that a relative path stays below its root once joined.
///
/// Archive entry names and item file names come from graph data, so `..`
/// and absolute components are refused.
pub fn is_contained_relative_path(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

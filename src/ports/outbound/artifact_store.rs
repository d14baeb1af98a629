use crate::shared::Result;
use std::path::Path;

/// ArtifactStore port for the pack-level files of a dump
///
/// Copy operations report `false` when the source is absent, so callers
/// decide which files are optional.
pub trait ArtifactStore {
    /// Whether `path` is an existing directory
    fn dir_exists(&self, path: &Path) -> bool;

    /// Creates a directory and its parents
    ///
    /// # Errors
    /// Returns an error if the path is a symbolic link or cannot be created
    fn create_dir(&self, path: &Path) -> Result<()>;

    /// Reads a text file, `None` if it does not exist
    fn read_text(&self, path: &Path) -> Result<Option<String>>;

    fn write_text(&self, path: &Path, content: &str) -> Result<()>;

    /// Copies one file
    ///
    /// # Returns
    /// `false` if `from` does not exist
    fn copy_file(&self, from: &Path, to: &Path) -> Result<bool>;

    /// Copies a directory tree
    ///
    /// # Returns
    /// `false` if `from` does not exist
    fn copy_tree(&self, from: &Path, to: &Path) -> Result<bool>;
}

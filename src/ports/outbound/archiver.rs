use crate::shared::Result;
use std::path::Path;

/// Archiver port for zipping dumped packs
pub trait Archiver {
    /// Zips the contents of `source_dir` into `archive_path`
    ///
    /// Entries are stored relative to `source_dir`. An existing archive at
    /// `archive_path` is replaced.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be walked or the archive
    /// cannot be written
    fn archive_dir(&self, source_dir: &Path, archive_path: &Path) -> Result<()>;
}

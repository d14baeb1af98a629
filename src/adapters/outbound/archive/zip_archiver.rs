use crate::ports::outbound::Archiver;
use crate::shared::error::PackError;
use crate::shared::security::validate_destination;
use crate::shared::Result;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// ZipArchiver adapter producing deflate-compressed zip files
///
/// Entry names use `/` separators regardless of platform. Symbolic links in
/// the source tree are skipped.
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }

    fn archive_error(path: &Path, e: impl std::fmt::Display) -> anyhow::Error {
        PackError::ArchiveError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    }

    fn entry_name(relative: &Path) -> String {
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl Default for ZipArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Archiver for ZipArchiver {
    fn archive_dir(&self, source_dir: &Path, archive_path: &Path) -> Result<()> {
        if !source_dir.is_dir() {
            return Err(Self::archive_error(
                archive_path,
                format!("Source directory does not exist: {}", source_dir.display()),
            ));
        }
        validate_destination(archive_path)?;
        if let Some(parent) = archive_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::archive_error(archive_path, e))?;
        }

        let file = File::create(archive_path).map_err(|e| Self::archive_error(archive_path, e))?;
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in WalkDir::new(source_dir).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| Self::archive_error(archive_path, e))?;
            let path = entry.path();
            // An archive written into its own source directory must not contain itself
            if path == archive_path {
                continue;
            }
            let relative = path
                .strip_prefix(source_dir)
                .map_err(|e| Self::archive_error(archive_path, e))?;
            if relative.as_os_str().is_empty() {
                continue;
            }
            let name = Self::entry_name(relative);

            let file_type = entry.file_type();
            if file_type.is_dir() {
                writer
                    .add_directory(name, options)
                    .map_err(|e| Self::archive_error(archive_path, e))?;
            } else if file_type.is_file() {
                writer
                    .start_file(name, options)
                    .map_err(|e| Self::archive_error(archive_path, e))?;
                let mut source = File::open(path).map_err(|e| Self::archive_error(path, e))?;
                io::copy(&mut source, &mut writer).map_err(|e| Self::archive_error(path, e))?;
            }
        }

        writer
            .finish()
            .map_err(|e| Self::archive_error(archive_path, e))?;
        tracing::debug!(archive = %archive_path.display(), "Wrote archive");
        Ok(())
    }
}

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a pack that was
/// rejected by the platform and a run that never got that far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every requested pack was dumped or uploaded
    Success = 0,
    /// At least one content item or pack was rejected during upload
    UploadFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (graph error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::UploadFailed => write!(f, "Upload Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for graph loading and pack serialization.
///
/// Upload outcomes have their own error family in
/// `content_graph::domain::upload_failure`; this enum covers everything that
/// happens before a request reaches the platform.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("Content node not found in graph: {node}\n\n💡 Hint: The graph export is inconsistent. Re-export the content graph and try again")]
    NodeNotFound { node: String },

    #[error("Duplicate content node in graph: {node}\n\n💡 Hint: Each (content type, id) pair may appear only once in a graph export")]
    DuplicateNode { node: String },

    #[error("Pack not found in graph: {pack_id}\n\n💡 Hint: {suggestion}")]
    PackNotFound { pack_id: String, suggestion: String },

    #[error("Pack source directory does not exist: {path}\n\n💡 Hint: Check that the content root points at a content repository checkout")]
    PackSourceMissing { path: PathBuf },

    #[error("Content graph file not found: {path}\n\n💡 Hint: {suggestion}")]
    GraphFileNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse content graph file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the graph export is valid JSON or YAML")]
    GraphParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to create archive: {path}\nDetails: {details}")]
    ArchiveError { path: PathBuf, details: String },

    /// Validation error for configuration and builder inputs
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

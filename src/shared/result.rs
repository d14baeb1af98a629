/// Type alias for Result with anyhow::Error as the error type.
///
/// Typed errors (`PackError`, `UploadError`) are raised into this alias and
/// recovered with `downcast_ref` where a caller needs the details.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

use crate::content_graph::domain::{ContentVersion, Marketplace, UploadError};

/// Lowest platform version accepting zipped pack uploads to XSOAR
pub const MINIMAL_UPLOAD_SUPPORTED_VERSION: ContentVersion = ContentVersion::new(6, 5, 0);

/// Lowest platform version honoring the skip-validation flag
pub const MINIMAL_ALLOWED_SKIP_VALIDATION_VERSION: ContentVersion =
    ContentVersion::new(6, 6, 0);

/// Flags sent with every upload request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    pub skip_validation: bool,
    pub skip_verify: bool,
}

/// VersionGate checks archive uploads against the target platform version
pub struct VersionGate;

impl VersionGate {
    /// Refuses bundle uploads the target platform cannot accept
    ///
    /// # Errors
    /// Returns `UploadError::UnsupportedTargetVersion` for XSOAR targets
    /// below [`MINIMAL_UPLOAD_SUPPORTED_VERSION`]
    pub fn check_bundle_upload(
        marketplace: Marketplace,
        target: &ContentVersion,
    ) -> Result<(), UploadError> {
        if marketplace == Marketplace::Xsoar && *target < MINIMAL_UPLOAD_SUPPORTED_VERSION {
            return Err(UploadError::UnsupportedTargetVersion {
                marketplace,
                target: target.clone(),
                minimum: MINIMAL_UPLOAD_SUPPORTED_VERSION,
            });
        }
        Ok(())
    }

    /// Builds the request flags for `target`
    ///
    /// Skip-validation is dropped for targets that do not support it;
    /// skip-verify is always sent.
    pub fn upload_options(skip_validation: bool, target: &ContentVersion) -> UploadOptions {
        UploadOptions {
            skip_validation: skip_validation && *target >= MINIMAL_ALLOWED_SKIP_VALIDATION_VERSION,
            skip_verify: true,
        }
    }
}

mod marketplace_references;
mod marketplace_tag_parser;
mod metadata_builder;
mod upload_response;
mod version_gate;

pub use marketplace_references::{
    replace_marketplace_references, replace_marketplace_references_in_value,
};
pub use marketplace_tag_parser::MarketplaceTagParser;
pub use metadata_builder::MetadataBuilder;
pub use upload_response::parse_upload_response;
pub use version_gate::{
    UploadOptions, VersionGate, MINIMAL_ALLOWED_SKIP_VALIDATION_VERSION,
    MINIMAL_UPLOAD_SUPPORTED_VERSION,
};

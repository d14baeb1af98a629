pub mod content_item;
pub mod content_type;
pub mod graph_store;
pub mod marketplace;
pub mod pack;
pub mod pack_content_items;
pub mod pack_metadata;
pub mod relationship;
pub mod upload_failure;
pub mod version;

pub use content_item::{ContentItem, NodeId};
pub use content_type::{Capabilities, ContentType};
pub use graph_store::ContentGraph;
pub use marketplace::Marketplace;
pub use pack::{Pack, PackDependency};
pub use pack_content_items::PackContentItems;
pub use pack_metadata::PackMetadata;
pub use relationship::{Relationship, RelationshipKind};
pub use upload_failure::{
    FailedUpload, FailedUploadMultiple, FailureKind, IncompatibleUpload, ItemRef, UploadError,
    UploadResponse,
};
pub use version::ContentVersion;

/// Data Transfer Objects for application layer
///
/// DTOs carry requests into the use cases and results back to the CLI,
/// keeping adapters away from the domain aggregates.
mod dump_request;
mod dump_summary;
mod upload_outcome;
mod upload_request;

pub use dump_request::DumpRequest;
pub use dump_summary::{DumpSummary, SkipReason, SkippedItem};
pub use upload_outcome::{UploadMode, UploadOutcome};
pub use upload_request::UploadRequest;

/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_upload_client;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_upload_client::{MockUploadClient, UploadCall};

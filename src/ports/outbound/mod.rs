/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, archives, network, console).
pub mod archiver;
pub mod artifact_store;
pub mod graph_reader;
pub mod item_serializer;
pub mod progress_reporter;
pub mod upload_client;

pub use archiver::Archiver;
pub use artifact_store::ArtifactStore;
pub use graph_reader::GraphReader;
pub use item_serializer::{ItemDumpError, ItemSerializer};
pub use progress_reporter::ProgressReporter;
pub use upload_client::{ClientError, UploadClient, UploadResponse};

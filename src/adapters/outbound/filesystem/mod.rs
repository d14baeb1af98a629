/// Filesystem adapters for graph loading and dump output
mod artifact_store;
mod graph_file_reader;
mod item_serializer;

pub use artifact_store::FileSystemArtifactStore;
pub use graph_file_reader::GraphFileReader;
pub use item_serializer::FileSystemItemSerializer;

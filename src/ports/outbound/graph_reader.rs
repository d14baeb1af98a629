use crate::content_graph::domain::ContentGraph;
use crate::shared::Result;
use std::path::Path;

/// GraphReader port for loading a content graph export
///
/// This port abstracts where the graph comes from (a file export today).
pub trait GraphReader {
    /// Loads the graph and resolves relative item paths
    ///
    /// # Arguments
    /// * `graph_path` - Path to the graph export
    /// * `content_root` - Directory relative item and pack paths resolve against
    ///
    /// # Errors
    /// Returns an error if:
    /// - The export does not exist or cannot be read
    /// - The export cannot be parsed
    /// - The export is inconsistent (duplicate nodes, dangling relationships)
    fn read_graph(&self, graph_path: &Path, content_root: &Path) -> Result<ContentGraph>;
}

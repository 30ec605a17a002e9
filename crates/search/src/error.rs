//! Search error types.

use std::path::PathBuf;

/// Errors produced while searching a game folder.
///
/// Missing subdirectories are never errors; only the folder itself being
/// unreadable or a worker dying is.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("folder unreadable: {}: {source}", .path.display())]
    FolderUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("search worker failed: {0}")]
    Worker(String),
}

//! Shortcut error types.

use std::io;
use std::path::PathBuf;

/// Errors produced while writing shortcuts.
#[derive(Debug, thiserror::Error)]
pub enum ShortcutError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to write shortcut '{name}' (fallback '{fallback}'): {source}")]
    WriteFailed {
        name: String,
        fallback: String,
        #[source]
        source: io::Error,
    },

    #[error("shortcut target must be an absolute path: {}", .0.display())]
    InvalidTarget(PathBuf),
}

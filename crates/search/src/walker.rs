//! Depth-limited, cancellable directory walking.
//!
//! Walks breadth first so shallower executables are always listed before
//! deeper ones. Entries within a directory are sorted by lowercase name, then
//! by raw name, which keeps the output stable across runs and platforms.

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use crate::types::ExtensionFilter;

/// Lists executables under a directory.
///
/// Implementations run on a blocking worker and must check `cancel`
/// regularly; a cancelled walk may return a partial list.
pub trait TreeWalker: Send + Sync {
    /// Lists executables under `root` down to `max_depth` directory levels
    /// (`Some(0)` = root only, `None` = unrestricted).
    ///
    /// Fails only if `root` itself cannot be read; unreadable
    /// subdirectories are skipped.
    fn list(
        &self,
        root: &Path,
        max_depth: Option<usize>,
        filter: &ExtensionFilter,
        cancel: &CancellationToken,
    ) -> io::Result<Vec<PathBuf>>;
}

/// [`TreeWalker`] over the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWalker;

impl TreeWalker for FsWalker {
    fn list(
        &self,
        root: &Path,
        max_depth: Option<usize>,
        filter: &ExtensionFilter,
        cancel: &CancellationToken,
    ) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut queue = VecDeque::from([(root.to_path_buf(), 0usize)]);

        while let Some((dir, depth)) = queue.pop_front() {
            if cancel.is_cancelled() {
                tracing::debug!(root = %root.display(), "walk cancelled");
                break;
            }

            let entries = match sorted_entries(&dir) {
                Ok(entries) => entries,
                Err(e) if depth == 0 => return Err(e),
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                    continue;
                }
            };

            for entry in entries {
                match entry.kind {
                    EntryKind::Dir => {
                        if max_depth.is_none_or(|max| depth < max) {
                            queue.push_back((entry.path, depth + 1));
                        }
                    }
                    EntryKind::File => {
                        if filter.matches(&entry.path) {
                            files.push(entry.path);
                        }
                    }
                }
            }
        }

        Ok(files)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    File,
    Dir,
}

#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) kind: EntryKind,
}

/// Reads a directory into a sorted entry list.
///
/// Symlinked directories are reported as neither file nor directory so
/// walks never follow them; symlinks to files count as files.
pub(crate) fn sorted_entries(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut entries: Vec<Entry> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let file_type = entry.file_type().ok()?;
            let path = entry.path();
            let kind = if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_symlink() && std::fs::metadata(&path).ok()?.is_file() {
                EntryKind::File
            } else {
                return None;
            };
            Some(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                kind,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(entries)
}

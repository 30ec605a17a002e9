//! Resolution of conventional subdirectory layouts.
//!
//! A layout is a relative path such as `Binaries/Win64` or `*/Binaries/Win64`.
//! Segments match real directory names case-insensitively, and `*` matches
//! every subdirectory. Layouts that do not exist resolve to nothing.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use crate::types::ExtensionFilter;
use crate::walker::{EntryKind, sorted_entries};

/// Wildcard segment.
pub const ANY_DIR: &str = "*";

/// Resolves `layout` under `root` to the existing directories it names.
pub fn resolve_layout(root: &Path, layout: &str, cancel: &CancellationToken) -> Vec<PathBuf> {
    let mut current = vec![root.to_path_buf()];

    for segment in layout.split(['/', '\\']).filter(|s| !s.is_empty()) {
        if cancel.is_cancelled() || current.is_empty() {
            return Vec::new();
        }

        let wanted = segment.to_lowercase();
        let mut next = Vec::new();
        for dir in &current {
            let Ok(entries) = sorted_entries(dir) else {
                continue;
            };
            next.extend(
                entries
                    .into_iter()
                    .filter(|e| e.kind == EntryKind::Dir)
                    .filter(|e| segment == ANY_DIR || e.name.to_lowercase() == wanted)
                    .map(|e| e.path),
            );
        }
        current = next;
    }

    current
}

/// Lists executables directly inside every directory any of `layouts`
/// resolves to.
///
/// Directories reached by more than one layout are listed once, in the
/// order they were first resolved.
pub fn probe_layouts(
    root: &Path,
    layouts: &[String],
    filter: &ExtensionFilter,
    cancel: &CancellationToken,
) -> Vec<PathBuf> {
    let mut seen: Vec<PathBuf> = Vec::new();
    let mut files = Vec::new();

    for layout in layouts {
        for dir in resolve_layout(root, layout, cancel) {
            if seen.contains(&dir) {
                continue;
            }
            if cancel.is_cancelled() {
                return files;
            }
            if let Ok(entries) = sorted_entries(&dir) {
                files.extend(
                    entries
                        .into_iter()
                        .filter(|e| e.kind == EntryKind::File && filter.matches(&e.path))
                        .map(|e| e.path),
                );
            }
            seen.push(dir);
        }
    }

    files
}

/// Executables directly inside `root` whose stem equals `game`, ignoring
/// case.
///
/// Stages A and B append these to a non-empty result, so an exact-name
/// file in the folder root is always scored.
pub fn exact_name_in_root(root: &Path, game: &str, filter: &ExtensionFilter) -> Vec<PathBuf> {
    let wanted = game.trim().to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }
    let Ok(entries) = sorted_entries(root) else {
        return Vec::new();
    };

    entries
        .into_iter()
        .filter(|e| e.kind == EntryKind::File && filter.matches(&e.path))
        .filter(|e| {
            e.path
                .file_stem()
                .is_some_and(|stem| stem.to_string_lossy().to_lowercase() == wanted)
        })
        .map(|e| e.path)
        .collect()
}

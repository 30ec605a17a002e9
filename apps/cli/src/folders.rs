//! Game-folder enumeration.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use gamelink_selection::GameFolder;

/// Lists the game folders directly under `root`.
///
/// Only directories count. Hidden directories (starting with `.`) and
/// `exclude` (the output directory) are skipped. Sorted case-insensitively.
pub fn list_game_folders(root: &Path, exclude: &Path) -> anyhow::Result<Vec<GameFolder>> {
    if !root.is_dir() {
        bail!("not a directory: {}", root.display());
    }

    let entries = std::fs::read_dir(root)
        .with_context(|| format!("failed to read directory {}", root.display()))?;
    let excluded = canonical(exclude);

    let mut folders: Vec<GameFolder> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            if !metadata.is_dir() {
                return None;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                return None;
            }
            let path = root.join(&name);
            if canonical(&path) == excluded {
                return None;
            }
            Some(GameFolder { name, path })
        })
        .collect();

    folders.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(folders)
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

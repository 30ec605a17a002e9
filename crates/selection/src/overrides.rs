//! Manual executable overrides.
//!
//! Some titles nest their binary so deep that searching costs more than a
//! lookup. The table maps an exact folder display name to the executable's
//! path relative to that folder.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Folder display name → relative executable path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualOverrides(BTreeMap<String, String>);

impl Default for ManualOverrides {
    fn default() -> Self {
        [
            ("Cyberpunk 2077", "bin/x64/Cyberpunk2077.exe"),
            ("The Witcher 3 Wild Hunt", "bin/x64/witcher3.exe"),
            ("Baldurs Gate 3", "bin/bg3.exe"),
            ("Red Dead Redemption 2", "RDR2.exe"),
            ("Grand Theft Auto V", "GTA5.exe"),
        ]
        .into_iter()
        .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ManualOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl ManualOverrides {
    /// An empty table.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds or replaces entries.
    pub fn extend<K: Into<String>, V: Into<String>>(
        &mut self,
        entries: impl IntoIterator<Item = (K, V)>,
    ) {
        self.0
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The relative path configured for `game`, if any.
    pub fn get(&self, game: &str) -> Option<&str> {
        self.0.get(game).map(String::as_str)
    }

    /// Resolves the override for `game` under `folder`.
    ///
    /// Returns `None` when there is no entry, the entry tries to leave the
    /// folder, or the file does not exist.
    pub async fn resolve(&self, game: &str, folder: &Path) -> Option<PathBuf> {
        let rel = self.get(game)?;
        let Some(path) = join_relative(folder, rel) else {
            tracing::warn!(game, rel, "ignoring override that escapes the game folder");
            return None;
        };

        let is_file = tokio::fs::metadata(&path)
            .await
            .is_ok_and(|meta| meta.is_file());
        if is_file {
            Some(path)
        } else {
            tracing::debug!(game, path = %path.display(), "override target missing");
            None
        }
    }
}

/// Joins a `/` or `\` separated relative path onto `base`.
///
/// Rejects empty, absolute and parent-traversing paths.
fn join_relative(base: &Path, rel: &str) -> Option<PathBuf> {
    if rel.starts_with(['/', '\\']) {
        return None;
    }

    let mut path = base.to_path_buf();
    let mut pushed = false;

    for segment in rel.split(['/', '\\']).filter(|s| !s.is_empty()) {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => {
                path.push(part);
                pushed = true;
            }
            (Some(Component::CurDir), None) => {}
            _ => return None,
        }
    }

    pushed.then_some(path)
}

//! Search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables and layout tables for [`BoundedSearcher`](crate::BoundedSearcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Depth used by stage G.
    pub max_depth: usize,
    /// Wall-clock budget for the whole search of one folder.
    pub timeout_secs: u64,
    /// Kept in reserve when starting the unrestricted walk.
    pub safety_margin_secs: u64,
    /// File extensions treated as executables (no leading dot).
    pub extensions: Vec<String>,
    /// Stage A: single-level subdirectory names probed for executables.
    pub probe_dirs: Vec<String>,
    /// Stage B: relative layouts, `/`-separated, `*` matches any directory.
    pub engine_layouts: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            timeout_secs: 30,
            safety_margin_secs: 5,
            extensions: vec!["exe".into()],
            probe_dirs: [
                "Game",
                "app",
                "bin",
                "binaries",
                "Windows",
                "x64",
                "Win64",
                "executable",
                "program",
                "launcher",
                "main",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            engine_layouts: default_engine_layouts(),
        }
    }
}

impl SearchConfig {
    /// Converts the second-based settings into [`SearchLimits`].
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_depth: self.max_depth.max(1),
            timeout: Duration::from_secs(self.timeout_secs),
            safety_margin: Duration::from_secs(self.safety_margin_secs),
        }
    }
}

/// Per-search bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: usize,
    pub timeout: Duration,
    pub safety_margin: Duration,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchConfig::default().limits()
    }
}

/// `Binaries/Win64` and `Engine/Binaries/Win64`, directly under the folder
/// and nested one to three unknown levels deep.
fn default_engine_layouts() -> Vec<String> {
    let bases = ["Engine/Binaries/Win64", "Binaries/Win64"];
    let prefixes = ["", "*/", "*/*/", "*/*/*/"];
    prefixes
        .iter()
        .flat_map(|prefix| bases.iter().map(move |base| format!("{prefix}{base}")))
        .collect()
}

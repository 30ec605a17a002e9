//! Run configuration.
//!
//! Read from a JSON file (`--config`, else `gamelink.json` in the library
//! root) and then overridden by command-line flags. Every table has built-in
//! defaults, so the file only needs the keys it changes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use gamelink_matcher::{PatternTables, ScoreWeights};
use gamelink_search::SearchConfig;
use gamelink_selection::ManualOverrides;

use crate::cli::Cli;

/// Config file looked up in the library root when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "gamelink.json";

/// Output directory name used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "_Shortcuts";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub patterns: PatternTables,
    pub scoring: ScoreWeights,
    pub overrides: ManualOverrides,

    /// Appended to `patterns.blocked_names`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_blocked_names: Vec<String>,
    /// Appended to `patterns.blocked_substrings`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_blocked_substrings: Vec<String>,
    /// Added to `overrides`, replacing entries with the same name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_overrides: BTreeMap<String, String>,

    /// Relative paths are resolved against the library root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub jobs: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            patterns: PatternTables::default(),
            scoring: ScoreWeights::default(),
            overrides: ManualOverrides::default(),
            extra_blocked_names: Vec::new(),
            extra_blocked_substrings: Vec::new(),
            extra_overrides: BTreeMap::new(),
            output_dir: None,
            jobs: 1,
        }
    }
}

impl AppConfig {
    /// Loads the config for a library.
    ///
    /// An explicit `path` must exist. Without one, `<root>/gamelink.json` is
    /// used if present. A file that does not parse is an error.
    pub fn load(path: Option<&Path>, root: &Path) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let candidate = root.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Applies command-line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(depth) = cli.max_depth {
            self.search.max_depth = depth;
        }
        if let Some(timeout) = cli.timeout {
            self.search.timeout_secs = timeout;
        }
        if let Some(jobs) = cli.jobs {
            self.jobs = jobs;
        }
        if let Some(output) = &cli.output {
            self.output_dir = Some(output.clone());
        }
    }

    /// Folds the `extra_*` lists into the main tables.
    pub fn merge_extras(&mut self) {
        self.patterns
            .extend_blocked_names(std::mem::take(&mut self.extra_blocked_names));
        self.patterns
            .extend_blocked_substrings(std::mem::take(&mut self.extra_blocked_substrings));
        self.overrides
            .extend(std::mem::take(&mut self.extra_overrides));
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.search.max_depth < 1 {
            bail!("max_depth must be at least 1");
        }
        if self.search.timeout_secs < 1 {
            bail!("timeout must be at least 1 second");
        }
        if self.jobs < 1 {
            bail!("jobs must be at least 1");
        }
        if self.search.extensions.iter().all(|e| e.trim().is_empty()) {
            bail!("at least one executable extension is required");
        }
        Ok(())
    }

    /// Directory that receives shortcuts and logs.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => root.join(dir),
            None => root.join(DEFAULT_OUTPUT_DIR),
        }
    }
}

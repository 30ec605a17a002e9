//! Data types produced by the search.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A discovered executable that might be the game's main binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Absolute path of the executable.
    pub path: PathBuf,
    /// Directory holding the executable.
    pub containing_folder: PathBuf,
}

impl Candidate {
    pub fn new(path: PathBuf) -> Self {
        let containing_folder = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            path,
            containing_folder,
        }
    }
}

/// One tier of the progressive search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStage {
    /// A: conventional binary subdirectories.
    ProbeDirs,
    /// B: engine layouts with wildcard segments.
    EngineLayouts,
    /// C: folder root, non-recursive.
    Root,
    /// D: depth 1.
    Depth1,
    /// E: depth 2.
    Depth2,
    /// F: depth 4.
    Depth4,
    /// G: configured maximum depth.
    MaxDepth,
    /// H: unrestricted, cancellable.
    Unrestricted,
}

impl SearchStage {
    /// Stages to run for a given maximum depth, in order.
    ///
    /// Fixed-depth listings that would not be shallower than stage G are
    /// dropped.
    pub fn plan(max_depth: usize) -> Vec<SearchStage> {
        let mut stages = vec![Self::ProbeDirs, Self::EngineLayouts, Self::Root];
        stages.extend(
            [Self::Depth1, Self::Depth2, Self::Depth4]
                .into_iter()
                .filter(|s| s.listing_depth(max_depth).is_some_and(|d| d < max_depth)),
        );
        stages.push(Self::MaxDepth);
        stages.push(Self::Unrestricted);
        stages
    }

    /// Depth passed to the tree walker; `None` for the probe stages and
    /// `Some(None)` for the unrestricted walk.
    pub(crate) fn walk_depth(self, max_depth: usize) -> Option<Option<usize>> {
        match self {
            Self::ProbeDirs | Self::EngineLayouts => None,
            Self::Unrestricted => Some(None),
            other => other.listing_depth(max_depth).map(Some),
        }
    }

    fn listing_depth(self, max_depth: usize) -> Option<usize> {
        match self {
            Self::Root => Some(0),
            Self::Depth1 => Some(1),
            Self::Depth2 => Some(2),
            Self::Depth4 => Some(4),
            Self::MaxDepth => Some(max_depth),
            Self::ProbeDirs | Self::EngineLayouts | Self::Unrestricted => None,
        }
    }

    /// Single-letter stage label (`A` through `H`).
    pub fn label(self) -> char {
        match self {
            Self::ProbeDirs => 'A',
            Self::EngineLayouts => 'B',
            Self::Root => 'C',
            Self::Depth1 => 'D',
            Self::Depth2 => 'E',
            Self::Depth4 => 'F',
            Self::MaxDepth => 'G',
            Self::Unrestricted => 'H',
        }
    }
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ProbeDirs => "probe dirs",
            Self::EngineLayouts => "engine layouts",
            Self::Root => "root",
            Self::Depth1 => "depth 1",
            Self::Depth2 => "depth 2",
            Self::Depth4 => "depth 4",
            Self::MaxDepth => "max depth",
            Self::Unrestricted => "unrestricted",
        };
        write!(f, "{} ({name})", self.label())
    }
}

/// Everything one folder search produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Executables in discovery order.
    pub files: Vec<Candidate>,
    /// The deadline cut the search short.
    pub truncated_by_timeout: bool,
    /// Stage that produced `files`, or the stage that timed out.
    pub stage: Option<SearchStage>,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Decides which files count as executables.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|e| *e == ext))
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(["exe"])
    }
}

//! Selection inputs and outcomes.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use gamelink_matcher::BlockReason;
use gamelink_search::{Candidate, SearchStage};

/// One top-level game directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFolder {
    /// Display name; the folder's own name.
    pub name: String,
    pub path: PathBuf,
}

impl GameFolder {
    /// Builds a folder entry named after the last path component.
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path }
    }
}

/// A candidate together with its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: i32,
}

/// A candidate the matcher rejected, kept for the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedCandidate {
    pub path: PathBuf,
    pub reason: BlockReason,
}

/// Terminal result for one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The executable to link. `score` is `None` for manual overrides.
    Chosen { path: PathBuf, score: Option<i32> },
    /// The search found no executables.
    NoExecutableFound,
    /// Executables were found but every one was blocked.
    AllCandidatesBlocked,
    /// The winner already belongs to another game in this run.
    DuplicateExecutable { path: PathBuf, claimed_by: String },
    /// Unexpected failure while processing the folder.
    Failed { cause: String },
}

impl SelectionOutcome {
    pub fn chosen_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Chosen { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Result log this outcome belongs in.
    pub fn category(&self) -> ResultCategory {
        match self {
            Self::Chosen { .. } => ResultCategory::Found,
            Self::NoExecutableFound => ResultCategory::NotFound,
            Self::AllCandidatesBlocked => ResultCategory::Blocked,
            Self::DuplicateExecutable { .. } => ResultCategory::Skipped,
            Self::Failed { .. } => ResultCategory::Error,
        }
    }
}

impl fmt::Display for SelectionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chosen {
                path,
                score: Some(score),
            } => write!(f, "chosen {} (score {score})", path.display()),
            Self::Chosen { path, score: None } => {
                write!(f, "chosen {} (override)", path.display())
            }
            Self::NoExecutableFound => write!(f, "no executable found"),
            Self::AllCandidatesBlocked => write!(f, "all candidates blocked"),
            Self::DuplicateExecutable { path, claimed_by } => {
                write!(f, "{} already used by '{claimed_by}'", path.display())
            }
            Self::Failed { cause } => write!(f, "failed: {cause}"),
        }
    }
}

/// Categorized result logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCategory {
    Found,
    NotFound,
    Skipped,
    Error,
    Blocked,
}

impl ResultCategory {
    pub fn all() -> &'static [ResultCategory] {
        &[
            Self::Found,
            Self::NotFound,
            Self::Skipped,
            Self::Error,
            Self::Blocked,
        ]
    }

    /// Log file name for this category.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Found => "found.log",
            Self::NotFound => "not_found.log",
            Self::Skipped => "skipped.log",
            Self::Error => "errors.log",
            Self::Blocked => "blocked.log",
        }
    }
}

/// What happened on the way to an outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// The winner came from the override table.
    pub from_override: bool,
    /// Stage that produced the candidates (or timed out).
    pub stage: Option<SearchStage>,
    /// The search deadline cut the search short.
    pub timed_out: bool,
    /// Executables returned by the search.
    pub candidates: usize,
    /// Non-blocked candidates, best first.
    pub ranked: Vec<ScoredCandidate>,
    /// Candidates dropped by the matcher.
    pub blocked: Vec<BlockedCandidate>,
    /// Recovered error attached to the outcome.
    pub cause: Option<String>,
    pub elapsed: Duration,
}

/// Outcome plus diagnostics for one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderReport {
    pub game: String,
    pub folder: PathBuf,
    pub outcome: SelectionOutcome,
    pub diagnostics: Diagnostics,
}

//! Candidate scoring.

use std::path::Path;

use crate::matcher::{BlockReason, Classification, PathMatcher};
use crate::patterns::{PatternTables, ScoreWeights};

/// Score returned for blocked executables.
pub const BLOCKED_SCORE: i32 = -1;

/// Outcome of scoring one executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub score: i32,
    /// Set when the matcher rejected the name; the score is then
    /// [`BLOCKED_SCORE`].
    pub blocked: Option<BlockReason>,
}

/// Ranks executables against the display name of their game folder.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    matcher: PathMatcher,
    weights: ScoreWeights,
}

impl Scorer {
    pub fn new(tables: &PatternTables, weights: ScoreWeights) -> Self {
        Self {
            matcher: PathMatcher::new(tables),
            weights,
        }
    }

    /// Scores `exe_path` for the folder named `folder_name`.
    ///
    /// `root` is the directory the search started from; it is only used for
    /// the depth penalty.
    pub fn score(&self, exe_path: &Path, folder_name: &str, root: &Path) -> i32 {
        self.evaluate(exe_path, folder_name, root).score
    }

    /// Like [`score`](Self::score), but also reports the block reason.
    pub fn evaluate(&self, exe_path: &Path, folder_name: &str, root: &Path) -> Evaluation {
        let stem = exe_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Classification::Blocked(reason) = self.matcher.classify(&stem) {
            return Evaluation {
                score: BLOCKED_SCORE,
                blocked: Some(reason),
            };
        }

        let name = stem.to_lowercase();
        let folder = folder_name.trim().to_lowercase();
        let w = &self.weights;

        if !folder.is_empty() {
            if name == folder {
                return allowed(w.exact_match);
            }
            if name == format!("{folder}-win64-shipping") {
                return allowed(w.shipping_match);
            }
        }

        let mut score = 0i32;

        if !folder.is_empty()
            && name.contains(&folder)
            && name.contains("win64")
            && name.contains("shipping")
        {
            score += w.shipping_combo;
        }
        if name.contains("game") {
            score += w.contains_game;
        }
        if !folder.is_empty() && name.contains(&folder) {
            score += w.contains_name;
        }

        let matching_words = folder
            .split_whitespace()
            .filter(|word| word.chars().count() > 3 && name.contains(word))
            .count();
        score = score.saturating_add(w.word_match.saturating_mul(matching_words as i32));

        if self.matcher.is_priority_name(&name) {
            score += w.priority_name;
        }
        if self.matcher.is_in_good_directory(exe_path) {
            score += w.good_directory;
        }
        if path_depth(exe_path, root) > w.depth_threshold {
            score -= w.depth_penalty;
        }

        allowed(score.min(w.accumulation_ceiling()))
    }
}

fn allowed(score: i32) -> Evaluation {
    Evaluation {
        score,
        blocked: None,
    }
}

/// Number of path levels between `root` and `path`.
///
/// A file directly inside `root` has depth 1. Paths outside `root` are
/// measured by component count difference and never go negative.
pub fn path_depth(path: &Path, root: &Path) -> usize {
    path.components()
        .count()
        .saturating_sub(root.components().count())
}

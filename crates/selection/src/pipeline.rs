//! Per-folder selection pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use gamelink_matcher::Scorer;
use gamelink_search::{BoundedSearcher, Candidate, SearchError};
use tracing::{debug, info, warn};

use crate::overrides::ManualOverrides;
use crate::registry::{Claim, DedupRegistry};
use crate::types::{
    BlockedCandidate, Diagnostics, FolderReport, GameFolder, ScoredCandidate, SelectionOutcome,
};

/// Picks the executable for each game folder.
///
/// Holds no per-folder state; `process` can run for several folders at once
/// as long as they share the same [`DedupRegistry`].
#[derive(Clone)]
pub struct SelectionPipeline {
    searcher: BoundedSearcher,
    scorer: Scorer,
    overrides: ManualOverrides,
    registry: Arc<DedupRegistry>,
}

impl SelectionPipeline {
    pub fn new(
        searcher: BoundedSearcher,
        scorer: Scorer,
        overrides: ManualOverrides,
        registry: Arc<DedupRegistry>,
    ) -> Self {
        Self {
            searcher,
            scorer,
            overrides,
            registry,
        }
    }

    /// Selects the executable for one folder.
    ///
    /// Never fails: search errors are folded into the outcome and the
    /// diagnostics.
    pub async fn process(&self, folder: &GameFolder) -> FolderReport {
        let started = Instant::now();
        let mut diagnostics = Diagnostics::default();
        let outcome = self.select(folder, &mut diagnostics).await;
        diagnostics.elapsed = started.elapsed();

        match &outcome {
            SelectionOutcome::Chosen { path, score } => {
                info!(game = %folder.name, path = %path.display(), ?score, "executable chosen");
            }
            SelectionOutcome::DuplicateExecutable { claimed_by, .. } => {
                info!(game = %folder.name, %claimed_by, "executable already claimed, skipping");
            }
            other => {
                info!(game = %folder.name, outcome = %other, timed_out = diagnostics.timed_out, "no executable selected");
            }
        }

        FolderReport {
            game: folder.name.clone(),
            folder: folder.path.clone(),
            outcome,
            diagnostics,
        }
    }

    async fn select(&self, folder: &GameFolder, diagnostics: &mut Diagnostics) -> SelectionOutcome {
        if let Some(path) = self.overrides.resolve(&folder.name, &folder.path).await {
            debug!(game = %folder.name, path = %path.display(), "using manual override");
            diagnostics.from_override = true;
            return self.claim(path, None, &folder.name).await;
        }

        let result = match self.searcher.find(&folder.path, &folder.name).await {
            Ok(result) => result,
            Err(e @ SearchError::FolderUnreadable { .. }) => {
                warn!(game = %folder.name, error = %e, "folder unreadable");
                diagnostics.cause = Some(e.to_string());
                return SelectionOutcome::NoExecutableFound;
            }
            Err(e) => {
                warn!(game = %folder.name, error = %e, "search failed");
                return SelectionOutcome::Failed {
                    cause: e.to_string(),
                };
            }
        };

        diagnostics.stage = result.stage;
        diagnostics.timed_out = result.truncated_by_timeout;
        diagnostics.candidates = result.files.len();

        if result.files.is_empty() {
            if result.truncated_by_timeout {
                diagnostics.cause = Some(format!(
                    "search timed out after {:.1}s",
                    result.elapsed.as_secs_f64()
                ));
            }
            return SelectionOutcome::NoExecutableFound;
        }

        let (ranked, blocked) = self.rank(result.files, &folder.name, &folder.path);
        let below_zero = diagnostics
            .candidates
            .saturating_sub(ranked.len() + blocked.len());
        diagnostics.ranked = ranked;
        diagnostics.blocked = blocked;

        let Some(winner) = diagnostics.ranked.first() else {
            if below_zero > 0 {
                diagnostics.cause = Some(format!(
                    "{} blocked, {below_zero} scored below zero",
                    diagnostics.blocked.len()
                ));
            }
            return SelectionOutcome::AllCandidatesBlocked;
        };

        let path = winner.candidate.path.clone();
        let score = winner.score;
        self.claim(path, Some(score), &folder.name).await
    }

    /// Scores candidates, drops blocked ones and sorts the rest best first.
    ///
    /// The sort is stable: equal scores keep search order, which lists
    /// shallower files first and then sorts by name.
    pub fn rank(
        &self,
        candidates: Vec<Candidate>,
        game: &str,
        root: &Path,
    ) -> (Vec<ScoredCandidate>, Vec<BlockedCandidate>) {
        let mut ranked = Vec::with_capacity(candidates.len());
        let mut blocked = Vec::new();

        for candidate in candidates {
            let eval = self.scorer.evaluate(&candidate.path, game, root);
            match eval.blocked {
                Some(reason) => {
                    debug!(game, path = %candidate.path.display(), %reason, "candidate blocked");
                    blocked.push(BlockedCandidate {
                        path: candidate.path,
                        reason,
                    });
                }
                None if eval.score < 0 => {
                    debug!(game, path = %candidate.path.display(), score = eval.score, "negative score dropped");
                }
                None => ranked.push(ScoredCandidate {
                    candidate,
                    score: eval.score,
                }),
            }
        }

        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        (ranked, blocked)
    }

    async fn claim(&self, path: PathBuf, score: Option<i32>, game: &str) -> SelectionOutcome {
        match self.registry.claim(&path, game).await {
            Claim::Claimed | Claim::AlreadyOwned => SelectionOutcome::Chosen { path, score },
            Claim::Conflict { claimed_by } => {
                SelectionOutcome::DuplicateExecutable { path, claimed_by }
            }
        }
    }
}

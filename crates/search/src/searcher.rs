//! Staged search with a per-folder deadline.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::time::{Duration, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{SearchConfig, SearchLimits};
use crate::error::SearchError;
use crate::layout::{exact_name_in_root, probe_layouts};
use crate::types::{Candidate, ExtensionFilter, SearchResult, SearchStage};
use crate::walker::{FsWalker, TreeWalker};

/// How a single stage ended.
enum StageRun {
    Completed(Vec<PathBuf>),
    TimedOut,
}

/// Finds executables inside one game folder without ever exceeding its
/// time budget.
///
/// Stateless apart from configuration; one searcher can serve many folders
/// concurrently.
#[derive(Clone)]
pub struct BoundedSearcher {
    limits: SearchLimits,
    filter: ExtensionFilter,
    probe_dirs: Arc<[String]>,
    engine_layouts: Arc<[String]>,
    walker: Arc<dyn TreeWalker>,
}

impl Default for BoundedSearcher {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl BoundedSearcher {
    /// Creates a searcher over the real filesystem.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            limits: config.limits(),
            filter: ExtensionFilter::new(&config.extensions),
            probe_dirs: config.probe_dirs.clone().into(),
            engine_layouts: config.engine_layouts.clone().into(),
            walker: Arc::new(FsWalker),
        }
    }

    /// Replaces the walker used by stages C through H.
    pub fn with_walker(mut self, walker: Arc<dyn TreeWalker>) -> Self {
        self.walker = walker;
        self
    }

    /// Replaces the default limits.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Searches `folder` with the configured limits.
    pub async fn find(&self, folder: &Path, game: &str) -> Result<SearchResult, SearchError> {
        self.find_with_limits(folder, game, self.limits).await
    }

    /// Searches `folder`, stopping at the first stage that yields an
    /// executable.
    ///
    /// The deadline covers all stages. The unrestricted stage only gets what
    /// is left minus the safety margin; if nothing is left it is skipped and
    /// the result is marked as truncated.
    pub async fn find_with_limits(
        &self,
        folder: &Path,
        game: &str,
        limits: SearchLimits,
    ) -> Result<SearchResult, SearchError> {
        let started = Instant::now();
        let deadline = started + limits.timeout;
        let cancel = CancellationToken::new();

        match tokio::fs::metadata(folder).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(SearchError::FolderUnreadable {
                    path: folder.to_path_buf(),
                    source: io::Error::other("not a directory"),
                });
            }
            Err(source) => {
                return Err(SearchError::FolderUnreadable {
                    path: folder.to_path_buf(),
                    source,
                });
            }
        }

        let max_depth = limits.max_depth.max(1);
        for stage in SearchStage::plan(max_depth) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let budget = if stage == SearchStage::Unrestricted {
                remaining.saturating_sub(limits.safety_margin)
            } else {
                remaining
            };

            if budget.is_zero() {
                warn!(game, %stage, "no time left, search truncated");
                return Ok(truncated(stage, started));
            }

            match self
                .run_stage(stage, folder, game, max_depth, budget, &cancel)
                .await?
            {
                StageRun::Completed(files) if !files.is_empty() => {
                    debug!(game, %stage, count = files.len(), "stage found executables");
                    return Ok(SearchResult {
                        files: files.into_iter().map(Candidate::new).collect(),
                        truncated_by_timeout: false,
                        stage: Some(stage),
                        elapsed: started.elapsed(),
                    });
                }
                StageRun::Completed(_) => {
                    debug!(game, %stage, "stage found nothing");
                }
                StageRun::TimedOut => {
                    warn!(
                        game,
                        %stage,
                        budget_ms = budget.as_millis() as u64,
                        "stage exceeded its budget, abandoning search"
                    );
                    return Ok(truncated(stage, started));
                }
            }
        }

        Ok(SearchResult {
            elapsed: started.elapsed(),
            ..SearchResult::default()
        })
    }

    /// Runs one stage on a blocking worker, giving up after `budget`.
    ///
    /// On timeout the worker's token is cancelled and its handle dropped;
    /// the caller never waits for it.
    async fn run_stage(
        &self,
        stage: SearchStage,
        folder: &Path,
        game: &str,
        max_depth: usize,
        budget: Duration,
        parent: &CancellationToken,
    ) -> Result<StageRun, SearchError> {
        let cancel = parent.child_token();
        let worker_cancel = cancel.clone();
        let root = folder.to_path_buf();
        let filter = self.filter.clone();

        let handle = match stage.walk_depth(max_depth) {
            None => {
                let layouts = match stage {
                    SearchStage::ProbeDirs => Arc::clone(&self.probe_dirs),
                    _ => Arc::clone(&self.engine_layouts),
                };
                let game = game.to_string();
                tokio::task::spawn_blocking(move || {
                    let mut files = probe_layouts(&root, &layouts, &filter, &worker_cancel);
                    if !files.is_empty() {
                        files.extend(exact_name_in_root(&root, &game, &filter));
                    }
                    Ok::<_, io::Error>(files)
                })
            }
            Some(depth) => {
                let walker = Arc::clone(&self.walker);
                tokio::task::spawn_blocking(move || {
                    walker.list(&root, depth, &filter, &worker_cancel)
                })
            }
        };

        match timeout(budget, handle).await {
            Ok(Ok(Ok(files))) => Ok(StageRun::Completed(files)),
            Ok(Ok(Err(source))) => Err(SearchError::FolderUnreadable {
                path: folder.to_path_buf(),
                source,
            }),
            Ok(Err(join)) => Err(SearchError::Worker(join.to_string())),
            Err(_) => {
                cancel.cancel();
                Ok(StageRun::TimedOut)
            }
        }
    }
}

fn truncated(stage: SearchStage, started: Instant) -> SearchResult {
    SearchResult {
        files: Vec::new(),
        truncated_by_timeout: true,
        stage: Some(stage),
        elapsed: started.elapsed(),
    }
}

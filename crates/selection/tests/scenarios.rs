//! End-to-end selection scenarios over real directory trees.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use gamelink_matcher::{Scorer, ScoreWeights};
use gamelink_search::{
    BoundedSearcher, ExtensionFilter, FsWalker, SearchConfig, SearchLimits, TreeWalker,
};
use gamelink_selection::{
    DedupRegistry, GameFolder, ManualOverrides, SelectionOutcome, SelectionPipeline,
};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"MZ").unwrap();
}

fn game_dir(lib: &TempDir, name: &str) -> GameFolder {
    let path = lib.path().join(name);
    fs::create_dir_all(&path).unwrap();
    GameFolder::from_path(path)
}

fn pipeline_with(searcher: BoundedSearcher, registry: Arc<DedupRegistry>) -> SelectionPipeline {
    SelectionPipeline::new(
        searcher,
        Scorer::default(),
        ManualOverrides::default(),
        registry,
    )
}

fn pipeline() -> SelectionPipeline {
    pipeline_with(BoundedSearcher::default(), Arc::new(DedupRegistry::new()))
}

/// Never finishes the unrestricted walk until cancelled.
struct SlowTreeWalker;

impl TreeWalker for SlowTreeWalker {
    fn list(
        &self,
        root: &Path,
        max_depth: Option<usize>,
        filter: &ExtensionFilter,
        cancel: &CancellationToken,
    ) -> io::Result<Vec<PathBuf>> {
        if max_depth.is_some() {
            return FsWalker.list(root, max_depth, filter, cancel);
        }
        while !cancel.is_cancelled() {
            std::thread::sleep(Duration::from_millis(10));
        }
        Ok(Vec::new())
    }
}

fn slow_searcher() -> BoundedSearcher {
    BoundedSearcher::new(&SearchConfig::default())
        .with_walker(Arc::new(SlowTreeWalker))
        .with_limits(SearchLimits {
            max_depth: 2,
            timeout: Duration::from_secs(1),
            safety_margin: Duration::ZERO,
        })
}

#[tokio::test]
async fn exact_name_beats_shipping_build() {
    let lib = TempDir::new().unwrap();
    let folder = game_dir(&lib, "half-life 2");
    touch(&folder.path, "data/half-life 2.exe");
    touch(&folder.path, "data/half-life 2-win64-shipping.exe");

    let report = pipeline().process(&folder).await;
    assert_eq!(
        report.outcome,
        SelectionOutcome::Chosen {
            path: folder.path.join("data").join("half-life 2.exe"),
            score: Some(ScoreWeights::default().exact_match),
        }
    );
}

#[tokio::test]
async fn exact_name_in_root_beats_shipping_build_in_engine_layout() {
    let lib = TempDir::new().unwrap();
    let folder = game_dir(&lib, "half-life 2");
    touch(&folder.path, "half-life 2.exe");
    touch(&folder.path, "Binaries/Win64/half-life 2-win64-shipping.exe");

    let report = pipeline().process(&folder).await;
    assert_eq!(
        report.outcome,
        SelectionOutcome::Chosen {
            path: folder.path.join("half-life 2.exe"),
            score: Some(ScoreWeights::default().exact_match),
        }
    );
    assert_eq!(report.diagnostics.ranked.len(), 2);
}

#[tokio::test]
async fn shipping_build_wins_without_exact_match() {
    let lib = TempDir::new().unwrap();
    let folder = game_dir(&lib, "Quarry");
    touch(&folder.path, "Quarry/Binaries/Win64/Quarry-Win64-Shipping.exe");
    touch(&folder.path, "Quarry/Binaries/Win64/QuarryGame.exe");

    let report = pipeline().process(&folder).await;
    assert_eq!(
        report.outcome.chosen_path(),
        Some(
            &folder
                .path
                .join("Quarry/Binaries/Win64/Quarry-Win64-Shipping.exe")
        )
    );
}

#[tokio::test]
async fn only_blocked_files_is_distinct_from_not_found() {
    let lib = TempDir::new().unwrap();
    let folder = game_dir(&lib, "Generic Title");
    touch(&folder.path, "uninstall.exe");
    touch(&folder.path, "setup.exe");

    let report = pipeline().process(&folder).await;
    assert_eq!(report.outcome, SelectionOutcome::AllCandidatesBlocked);
    assert_eq!(report.diagnostics.candidates, 2);
    assert_eq!(report.diagnostics.blocked.len(), 2);
    assert!(report.diagnostics.ranked.is_empty());
}

#[tokio::test]
async fn timed_out_search_reports_not_found() {
    let lib = TempDir::new().unwrap();
    let folder = game_dir(&lib, "Big Game");
    fs::create_dir_all(folder.path.join("a/b/c/d")).unwrap();

    let started = Instant::now();
    let report = pipeline_with(slow_searcher(), Arc::new(DedupRegistry::new()))
        .process(&folder)
        .await;

    assert_eq!(report.outcome, SelectionOutcome::NoExecutableFound);
    assert!(report.diagnostics.timed_out);
    assert!(
        report
            .diagnostics
            .cause
            .as_deref()
            .is_some_and(|c| c.contains("timed out"))
    );
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn processing_twice_is_idempotent() {
    let lib = TempDir::new().unwrap();
    let folder = game_dir(&lib, "Big Game");
    touch(&folder.path, "bin/biggame.exe");
    touch(&folder.path, "bin/crashpad_handler.exe");

    let p = pipeline();
    let first = p.process(&folder).await;
    let second = p.process(&folder).await;
    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.diagnostics.ranked, second.diagnostics.ranked);
    assert!(matches!(first.outcome, SelectionOutcome::Chosen { .. }));
}

#[tokio::test]
async fn timed_out_search_is_idempotent() {
    let lib = TempDir::new().unwrap();
    let folder = game_dir(&lib, "Big Game");
    fs::create_dir_all(folder.path.join("a/b/c")).unwrap();

    let p = pipeline_with(slow_searcher(), Arc::new(DedupRegistry::new()));
    let first = p.process(&folder).await;
    let second = p.process(&folder).await;
    assert_eq!(first.outcome, SelectionOutcome::NoExecutableFound);
    assert_eq!(first.outcome, second.outcome);
}

#[tokio::test]
async fn duplicate_claim_leaves_registry_unchanged() {
    let lib = TempDir::new().unwrap();
    let shared = lib.path().join("shared");
    touch(&shared, "engine.exe");

    let registry = Arc::new(DedupRegistry::new());
    let exe = shared.join("engine.exe");
    registry.claim(&exe, "A").await;

    let folder = GameFolder {
        name: "B".into(),
        path: shared.clone(),
    };
    let report = pipeline_with(BoundedSearcher::default(), Arc::clone(&registry))
        .process(&folder)
        .await;

    assert_eq!(
        report.outcome,
        SelectionOutcome::DuplicateExecutable {
            path: exe.clone(),
            claimed_by: "A".into(),
        }
    );
    assert_eq!(registry.owner(&exe).await.as_deref(), Some("A"));
    assert_eq!(registry.len().await, 1);
}

#[tokio::test]
async fn folders_sharing_a_registry_do_not_steal_claims() {
    let lib = TempDir::new().unwrap();
    let first = game_dir(&lib, "First");
    touch(&first.path, "first.exe");
    let second = game_dir(&lib, "Second");
    touch(&second.path, "second.exe");

    let registry = Arc::new(DedupRegistry::new());
    let p = pipeline_with(BoundedSearcher::default(), Arc::clone(&registry));
    let (a, b) = tokio::join!(p.process(&first), p.process(&second));

    assert!(matches!(a.outcome, SelectionOutcome::Chosen { .. }));
    assert!(matches!(b.outcome, SelectionOutcome::Chosen { .. }));
    assert_eq!(registry.len().await, 2);
}

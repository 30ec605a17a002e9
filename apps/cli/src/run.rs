//! Run orchestration.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use futures_util::StreamExt;
use tracing::{info, warn};

use gamelink_matcher::Scorer;
use gamelink_search::BoundedSearcher;
use gamelink_selection::{
    DedupRegistry, FolderReport, ResultCategory, RunCounters, SelectionOutcome, SelectionPipeline,
};
use gamelink_shortcuts::{ShortcutOutcome, ShortcutWriter};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::folders::list_game_folders;
use crate::reports::ResultLogs;

/// Entry point behind `main`.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => prompt_root()?,
    };
    if !root.is_dir() {
        bail!("library root is not a directory: {}", root.display());
    }
    let root = absolute_root(&root)?;

    let mut config = AppConfig::load(cli.config.as_deref(), &root)?;
    config.apply_cli(&cli);
    config.merge_extras();
    config.validate()?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let counters = process_library(&root, &config, cli.dry_run).await?;
    println!();
    println!("{counters}");
    Ok(())
}

/// Processes every game folder under `root` and returns the run totals.
///
/// A relative `root` is resolved against the current directory.
pub async fn process_library(
    root: &Path,
    config: &AppConfig,
    dry_run: bool,
) -> anyhow::Result<RunCounters> {
    let root = absolute_root(root)?;
    let output_dir = config.output_dir(&root);
    let writer = ShortcutWriter::new(&output_dir);
    let logs = ResultLogs::new(&output_dir);
    if !dry_run {
        writer
            .ensure_dir()
            .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    }

    let folders = list_game_folders(&root, &output_dir)?;
    let total = folders.len();
    info!(root = %root.display(), folders = total, jobs = config.jobs, dry_run, "processing library");

    let pipeline = build_pipeline(config);
    let finished = futures_util::stream::iter(folders)
        .map(|folder| {
            let pipeline = pipeline.clone();
            let writer = writer.clone();
            let logs = logs.clone();
            async move {
                let report = pipeline.process(&folder).await;
                complete_folder(report, writer, logs, dry_run).await
            }
        })
        .buffered(config.jobs);
    let mut finished = std::pin::pin!(finished);

    let mut counters = RunCounters::default();
    let mut index = 0;
    while let Some(done) = finished.next().await {
        index += 1;
        counters += done.tally;
        println!("[{index}/{total}] {} -> {}", done.game, done.status);
    }

    Ok(counters)
}

/// One processed folder, ready for the progress line.
struct FolderDone {
    game: String,
    status: String,
    tally: RunCounters,
}

/// Records the report and, unless dry-running, writes its shortcut and log
/// lines on a blocking worker.
async fn complete_folder(
    report: FolderReport,
    writer: ShortcutWriter,
    logs: ResultLogs,
    dry_run: bool,
) -> FolderDone {
    let game = report.game.clone();
    let mut tally = RunCounters::default();
    tally.record(&report);

    if dry_run {
        return FolderDone {
            game,
            status: report.outcome.to_string(),
            tally,
        };
    }

    let written = tokio::task::spawn_blocking(move || {
        let mut shortcuts = RunCounters::default();
        let status = finish_folder(&report, &writer, &logs, &mut shortcuts);
        (status, shortcuts)
    })
    .await;

    let status = match written {
        Ok((status, shortcuts)) => {
            tally += shortcuts;
            status
        }
        Err(e) => {
            warn!(game = %game, error = %e, "shortcut worker failed");
            tally.errored += 1;
            format!("failed: {e}")
        }
    };

    FolderDone {
        game,
        status,
        tally,
    }
}

fn absolute_root(root: &Path) -> anyhow::Result<PathBuf> {
    std::path::absolute(root)
        .with_context(|| format!("failed to resolve library root {}", root.display()))
}

fn build_pipeline(config: &AppConfig) -> SelectionPipeline {
    SelectionPipeline::new(
        BoundedSearcher::new(&config.search),
        Scorer::new(&config.patterns, config.scoring.clone()),
        config.overrides.clone(),
        Arc::new(DedupRegistry::new()),
    )
}

/// Writes the shortcut and log lines for one folder and returns its status.
fn finish_folder(
    report: &FolderReport,
    writer: &ShortcutWriter,
    logs: &ResultLogs,
    counters: &mut RunCounters,
) -> String {
    let game = &report.game;
    logs.append_blocked(report);

    let (category, line, status) = match &report.outcome {
        SelectionOutcome::Chosen { path, .. } => {
            let (category, status) = write_shortcut(game, path, writer, counters);
            let line = format!("{game} -> {} [{status}]", path.display());
            (category, line, status)
        }
        SelectionOutcome::NoExecutableFound => {
            let status = match &report.diagnostics.cause {
                Some(cause) => format!("no executable found ({cause})"),
                None => "no executable found".to_string(),
            };
            let line = format!("{game}: {status} in {}", report.folder.display());
            (ResultCategory::NotFound, line, status)
        }
        other => {
            let status = match &report.diagnostics.cause {
                Some(cause) => format!("{other} ({cause})"),
                None => other.to_string(),
            };
            let line = format!("{game}: {status}");
            (other.category(), line, status)
        }
    };

    logs.append(category, &line);
    status
}

fn write_shortcut(
    game: &str,
    target: &Path,
    writer: &ShortcutWriter,
    counters: &mut RunCounters,
) -> (ResultCategory, String) {
    match writer.create(game, target) {
        Ok(ShortcutOutcome::Created(path)) => {
            counters.created += 1;
            (ResultCategory::Found, format!("created {}", file_label(&path)))
        }
        Ok(ShortcutOutcome::CreatedWithFallbackName(path)) => {
            counters.created += 1;
            counters.created_with_fallback += 1;
            (
                ResultCategory::Found,
                format!("created {} (fallback name)", file_label(&path)),
            )
        }
        Ok(ShortcutOutcome::AlreadyExists(path)) => {
            counters.already_present += 1;
            (
                ResultCategory::Found,
                format!("{} already present", file_label(&path)),
            )
        }
        Ok(ShortcutOutcome::Conflict {
            path,
            existing_target,
        }) => {
            counters.skipped += 1;
            let existing = existing_target
                .map(|t| t.display().to_string())
                .unwrap_or_else(|| "an unknown target".into());
            warn!(game, shortcut = %path.display(), %existing, "shortcut name taken by another target");
            (
                ResultCategory::Skipped,
                format!("{} already points to {existing}", file_label(&path)),
            )
        }
        Err(e) => {
            counters.errored += 1;
            warn!(game, error = %e, "shortcut not written");
            (ResultCategory::Error, format!("shortcut failed: {e}"))
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn prompt_root() -> anyhow::Result<PathBuf> {
    print!("Game library folder: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read library folder")?;

    let trimmed = line.trim().trim_matches('"');
    if trimmed.is_empty() {
        bail!("no library folder given");
    }
    Ok(PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_label_uses_file_name() {
        assert_eq!(file_label(Path::new("/out/Celeste.url")), "Celeste.url");
    }

    #[test]
    fn relative_root_becomes_absolute() {
        let root = absolute_root(Path::new("Games")).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("Games"));
    }
}

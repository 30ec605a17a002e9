//! Categorized result logs.
//!
//! One append-only file per [`ResultCategory`] in the output directory. Each
//! line is prefixed with a local timestamp.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use gamelink_selection::{FolderReport, ResultCategory};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct ResultLogs {
    dir: PathBuf,
}

impl ResultLogs {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, category: ResultCategory) -> PathBuf {
        self.dir.join(category.file_name())
    }

    /// Appends one timestamped line. Failures are logged and swallowed.
    pub fn append(&self, category: ResultCategory, line: &str) {
        if let Err(e) = append_line(&self.path(category), line) {
            tracing::warn!(log = category.file_name(), error = %e, "failed to write result log");
        }
    }

    /// Writes every individual blocked classification of a folder.
    pub fn append_blocked(&self, report: &FolderReport) {
        for blocked in &report.diagnostics.blocked {
            self.append(
                ResultCategory::Blocked,
                &format!(
                    "{}: {} ({})",
                    report.game,
                    blocked.path.display(),
                    blocked.reason
                ),
            );
        }
    }
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(
        file,
        "[{}] {line}",
        Local::now().format(TIMESTAMP_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamelink_matcher::BlockReason;
    use gamelink_selection::{BlockedCandidate, Diagnostics, SelectionOutcome};
    use tempfile::TempDir;

    #[test]
    fn appends_timestamped_lines() {
        let dir = TempDir::new().unwrap();
        let logs = ResultLogs::new(dir.path());
        logs.append(ResultCategory::Found, "Celeste -> /g/Celeste.exe");
        logs.append(ResultCategory::Found, "Hollow -> /g/hollow.exe");

        let content = std::fs::read_to_string(dir.path().join("found.log")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] Celeste -> /g/Celeste.exe"));
    }

    #[test]
    fn blocked_classifications_listed() {
        let dir = TempDir::new().unwrap();
        let logs = ResultLogs::new(dir.path());
        let report = FolderReport {
            game: "Quarry".into(),
            folder: PathBuf::from("/g/Quarry"),
            outcome: SelectionOutcome::AllCandidatesBlocked,
            diagnostics: Diagnostics {
                blocked: vec![BlockedCandidate {
                    path: PathBuf::from("/g/Quarry/unins000.exe"),
                    reason: BlockReason::ExactName("unins000".into()),
                }],
                ..Default::default()
            },
        };
        logs.append_blocked(&report);

        let content = std::fs::read_to_string(logs.path(ResultCategory::Blocked)).unwrap();
        assert!(content.contains("Quarry: /g/Quarry/unins000.exe (blacklisted name 'unins000')"));
    }

    #[test]
    fn missing_directory_does_not_panic() {
        let dir = TempDir::new().unwrap();
        let logs = ResultLogs::new(dir.path().join("missing"));
        logs.append(ResultCategory::Error, "boom");
        assert!(!logs.path(ResultCategory::Error).exists());
    }
}

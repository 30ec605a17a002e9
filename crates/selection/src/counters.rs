//! End-of-run aggregate counters.

use std::fmt;
use std::ops::AddAssign;

use crate::types::{FolderReport, SelectionOutcome};

/// Totals for one run.
///
/// Selection outcomes are counted by [`record`](Self::record); shortcut
/// results are counted by whoever writes the shortcuts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub folders: usize,
    pub chosen: usize,
    pub created: usize,
    pub created_with_fallback: usize,
    pub already_present: usize,
    pub skipped: usize,
    pub not_found: usize,
    pub blocked: usize,
    pub errored: usize,
    pub timed_out: usize,
}

impl RunCounters {
    pub fn record(&mut self, report: &FolderReport) {
        self.folders += 1;
        if report.diagnostics.timed_out {
            self.timed_out += 1;
        }

        match &report.outcome {
            SelectionOutcome::Chosen { .. } => self.chosen += 1,
            SelectionOutcome::NoExecutableFound => self.not_found += 1,
            SelectionOutcome::AllCandidatesBlocked => self.blocked += 1,
            SelectionOutcome::DuplicateExecutable { .. } => self.skipped += 1,
            SelectionOutcome::Failed { .. } => self.errored += 1,
        }
    }
}

impl AddAssign for RunCounters {
    fn add_assign(&mut self, other: Self) {
        self.folders += other.folders;
        self.chosen += other.chosen;
        self.created += other.created;
        self.created_with_fallback += other.created_with_fallback;
        self.already_present += other.already_present;
        self.skipped += other.skipped;
        self.not_found += other.not_found;
        self.blocked += other.blocked;
        self.errored += other.errored;
        self.timed_out += other.timed_out;
    }
}

impl fmt::Display for RunCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Folders processed:         {}", self.folders)?;
        writeln!(f, "Shortcuts created:         {}", self.created)?;
        writeln!(f, "  with fallback name:      {}", self.created_with_fallback)?;
        writeln!(f, "Already present:           {}", self.already_present)?;
        writeln!(f, "Skipped:                   {}", self.skipped)?;
        writeln!(f, "Not found:                 {}", self.not_found)?;
        writeln!(f, "All candidates blocked:    {}", self.blocked)?;
        writeln!(f, "Errors:                    {}", self.errored)?;
        write!(f, "Timed out:                 {}", self.timed_out)
    }
}

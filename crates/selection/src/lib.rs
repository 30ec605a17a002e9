//! Per-folder executable selection.
//!
//! The [`SelectionPipeline`] turns one game folder into one
//! [`SelectionOutcome`]:
//!
//! 1. **Override**: a configured relative path wins if it exists
//! 2. **Search**: staged, deadline-bounded search for executables
//! 3. **Score**: blocked names dropped, the rest ranked (stable)
//! 4. **Claim**: the winner is registered in the run's [`DedupRegistry`]
//!
//! No folder-level failure escapes `process`; every failure becomes an
//! outcome so the run can continue with the next folder.

pub mod counters;
pub mod overrides;
pub mod pipeline;
pub mod registry;
pub mod types;

pub use counters::RunCounters;
pub use overrides::ManualOverrides;
pub use pipeline::SelectionPipeline;
pub use registry::{Claim, DedupRegistry};
pub use types::{
    BlockedCandidate, Diagnostics, FolderReport, GameFolder, ResultCategory, ScoredCandidate,
    SelectionOutcome,
};

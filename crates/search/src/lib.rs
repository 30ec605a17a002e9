//! Bounded executable search for a single game folder.
//!
//! The search runs in progressively deeper stages and stops at the first
//! stage that yields at least one executable:
//!
//! | stage | strategy |
//! |---|---|
//! | A | conventional binary subdirectories (`bin`, `Game`, `Win64`, ...) |
//! | B | engine layouts (`Binaries/Win64`, with `*` wildcard segments) |
//! | C | folder root only |
//! | D, E, F | listings at depth 1, 2 and 4 |
//! | G | listing at the configured maximum depth |
//! | H | unrestricted walk, abandoned when the budget runs out |
//!
//! When stage A or B succeeds, executables in the folder root named exactly
//! like the folder are added to its result.
//!
//! Every stage runs on a blocking worker under the per-folder deadline and
//! a [`CancellationToken`](tokio_util::sync::CancellationToken), so a huge
//! or stalled tree never blocks the caller past its budget.

pub mod config;
pub mod error;
pub mod layout;
pub mod searcher;
pub mod types;
pub mod walker;

pub use config::{SearchConfig, SearchLimits};
pub use error::SearchError;
pub use searcher::BoundedSearcher;
pub use types::{Candidate, ExtensionFilter, SearchResult, SearchStage};
pub use walker::{FsWalker, TreeWalker};

//! Executable classification and scoring.
//!
//! Pure functions only: nothing in this crate touches the filesystem.
//! Every pattern the classifier or the scorer consults lives in
//! [`PatternTables`] / [`ScoreWeights`], so callers can load them from
//! configuration and extend them without code changes.
//!
//! # Rules
//!
//! 1. **Blocked** names (exact blacklist or bad substring) score `-1`
//! 2. **Exact** folder-name match wins outright
//! 3. **Shipping** build (`<name>-win64-shipping`) comes second
//! 4. Everything else **accumulates** bonuses and a depth penalty

pub mod matcher;
pub mod patterns;
pub mod scorer;

pub use matcher::{BlockReason, Classification, PathMatcher};
pub use patterns::{PatternTables, ScoreWeights};
pub use scorer::{BLOCKED_SCORE, Evaluation, Scorer, path_depth};

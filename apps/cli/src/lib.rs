//! `gamelink` command-line front end.
//!
//! # Run
//!
//! 1. Resolve the library root (argument or prompt) and load the config.
//! 2. Enumerate game folders directly under the root.
//! 3. Run the selection pipeline over every folder, `--jobs` at a time.
//! 4. Write a shortcut per chosen executable and append to the result logs.
//! 5. Print one progress line per folder and a closing summary.

pub mod cli;
pub mod config;
pub mod folders;
pub mod reports;
pub mod run;

pub use cli::Cli;
pub use config::AppConfig;
pub use run::{process_library, run};

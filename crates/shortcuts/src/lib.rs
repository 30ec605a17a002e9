//! Launcher shortcut files.
//!
//! Shortcuts are Windows Internet Shortcut files (`<name>.url`) pointing at a
//! `file:///` URL. The format is plain INI, so an existing shortcut's target
//! can be read back and compared before anything is overwritten.

pub mod error;
pub mod sanitize;
pub mod url_file;
pub mod writer;

pub use error::ShortcutError;
pub use sanitize::{MAX_NAME_LEN, fallback_name, sanitize_name};
pub use url_file::{file_url, read_target};
pub use writer::{ShortcutOutcome, ShortcutWriter};

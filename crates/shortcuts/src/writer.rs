//! Shortcut creation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ShortcutError;
use crate::sanitize::{MAX_NAME_LEN, fallback_name, sanitize_name};
use crate::url_file::{read_target, render, same_target};

const EXTENSION: &str = "url";

/// Result of asking for a shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutOutcome {
    Created(PathBuf),
    /// The sanitized name failed; the alphanumeric fallback was used.
    CreatedWithFallbackName(PathBuf),
    /// A shortcut with this name already points at the same target.
    AlreadyExists(PathBuf),
    /// A shortcut with this name points somewhere else. Left untouched.
    Conflict {
        path: PathBuf,
        existing_target: Option<PathBuf>,
    },
}

impl ShortcutOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(p) | Self::CreatedWithFallbackName(p) | Self::AlreadyExists(p) => p,
            Self::Conflict { path, .. } => path,
        }
    }
}

/// Writes shortcuts into one output directory.
#[derive(Debug, Clone)]
pub struct ShortcutWriter {
    output_dir: PathBuf,
    max_name_len: usize,
}

impl ShortcutWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            max_name_len: MAX_NAME_LEN,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates the output directory if needed.
    pub fn ensure_dir(&self) -> Result<(), ShortcutError> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Shortcut path that `create` tries first for `display_name`.
    pub fn shortcut_path(&self, display_name: &str) -> PathBuf {
        self.path_for(&sanitize_name(display_name, self.max_name_len))
    }

    /// Creates a shortcut named after `display_name` pointing at `target`.
    ///
    /// Never overwrites: an existing shortcut is reported as
    /// [`AlreadyExists`](ShortcutOutcome::AlreadyExists) or
    /// [`Conflict`](ShortcutOutcome::Conflict).
    pub fn create(
        &self,
        display_name: &str,
        target: &Path,
    ) -> Result<ShortcutOutcome, ShortcutError> {
        if !target.is_absolute() {
            return Err(ShortcutError::InvalidTarget(target.to_path_buf()));
        }

        let name = sanitize_name(display_name, self.max_name_len);
        let primary = self.path_for(&name);
        if let Some(existing) = inspect_existing(&primary, target) {
            return Ok(existing);
        }

        let primary_err = match write_new(&primary, target) {
            Ok(()) => {
                debug!(path = %primary.display(), "shortcut created");
                return Ok(ShortcutOutcome::Created(primary));
            }
            Err(e) => e,
        };

        let fallback = fallback_name(display_name, self.max_name_len);
        warn!(name = %name, %fallback, error = %primary_err, "shortcut write failed, trying fallback name");
        if fallback == name {
            return Err(ShortcutError::WriteFailed {
                name,
                fallback,
                source: primary_err,
            });
        }

        let secondary = self.path_for(&fallback);
        if let Some(existing) = inspect_existing(&secondary, target) {
            return Ok(existing);
        }

        match write_new(&secondary, target) {
            Ok(()) => Ok(ShortcutOutcome::CreatedWithFallbackName(secondary)),
            Err(source) => Err(ShortcutError::WriteFailed {
                name,
                fallback,
                source,
            }),
        }
    }

    fn path_for(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}.{EXTENSION}"))
    }
}

/// Classifies a shortcut file already sitting at `path`, if any.
fn inspect_existing(path: &Path, target: &Path) -> Option<ShortcutOutcome> {
    if !path.is_file() {
        return None;
    }

    let existing_target = match read_target(path) {
        Ok(t) => t,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read existing shortcut");
            None
        }
    };

    match existing_target {
        Some(existing) if same_target(&existing, target) => {
            Some(ShortcutOutcome::AlreadyExists(path.to_path_buf()))
        }
        existing_target => Some(ShortcutOutcome::Conflict {
            path: path.to_path_buf(),
            existing_target,
        }),
    }
}

fn write_new(path: &Path, target: &Path) -> io::Result<()> {
    let body = render(target);
    write_new_with(path, |file| file.write_all(body.as_bytes()))
}

/// Creates `path` exclusively and fills it with `fill`.
///
/// A file that was created but could not be filled is removed again.
fn write_new_with(
    path: &Path,
    fill: impl FnOnce(&mut File) -> io::Result<()>,
) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;

    let written = fill(&mut file).and_then(|()| file.flush());
    if let Err(e) = written {
        drop(file);
        if let Err(cleanup) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %cleanup, "could not remove partial shortcut");
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ShortcutWriter) {
        let dir = TempDir::new().unwrap();
        let writer = ShortcutWriter::new(dir.path().join("_Shortcuts"));
        writer.ensure_dir().unwrap();
        (dir, writer)
    }

    #[test]
    fn creates_shortcut_file() {
        let (dir, writer) = setup();
        let target = dir.path().join("Celeste").join("Celeste.exe");

        let outcome = writer.create("Celeste", &target).unwrap();
        let expected = writer.output_dir().join("Celeste.url");
        assert_eq!(outcome, ShortcutOutcome::Created(expected.clone()));

        let read = read_target(&expected).unwrap().unwrap();
        assert!(same_target(&read, &target));
    }

    #[test]
    fn same_target_is_a_no_op() {
        let (dir, writer) = setup();
        let target = dir.path().join("Celeste").join("Celeste.exe");
        writer.create("Celeste", &target).unwrap();
        let before = fs::read(writer.shortcut_path("Celeste")).unwrap();

        let outcome = writer.create("Celeste", &target).unwrap();
        assert!(matches!(outcome, ShortcutOutcome::AlreadyExists(_)));
        assert_eq!(fs::read(outcome.path()).unwrap(), before);
    }

    #[test]
    fn different_target_is_a_conflict() {
        let (dir, writer) = setup();
        let first = dir.path().join("A").join("a.exe");
        let second = dir.path().join("B").join("b.exe");
        writer.create("Shared Name", &first).unwrap();

        let outcome = writer.create("Shared Name", &second).unwrap();
        match outcome {
            ShortcutOutcome::Conflict {
                path,
                existing_target,
            } => {
                assert_eq!(path, writer.shortcut_path("Shared Name"));
                assert!(same_target(&existing_target.unwrap(), &first));
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        let read = read_target(&writer.shortcut_path("Shared Name"))
            .unwrap()
            .unwrap();
        assert!(same_target(&read, &first));
    }

    #[test]
    fn unparseable_existing_file_is_a_conflict() {
        let (dir, writer) = setup();
        fs::write(writer.shortcut_path("Odd"), "not a shortcut").unwrap();

        let outcome = writer
            .create("Odd", &dir.path().join("odd.exe"))
            .unwrap();
        assert!(matches!(
            outcome,
            ShortcutOutcome::Conflict {
                existing_target: None,
                ..
            }
        ));
    }

    #[test]
    fn falls_back_when_primary_name_unwritable() {
        let (dir, writer) = setup();
        // A directory squatting on the primary name makes the write fail.
        fs::create_dir(writer.shortcut_path("Half-Life 2")).unwrap();

        let target = dir.path().join("hl2.exe");
        let outcome = writer.create("Half-Life 2", &target).unwrap();
        assert_eq!(
            outcome,
            ShortcutOutcome::CreatedWithFallbackName(writer.output_dir().join("HalfLife2.url"))
        );
    }

    #[test]
    fn both_names_failing_is_an_error() {
        let dir = TempDir::new().unwrap();
        let writer = ShortcutWriter::new(dir.path().join("missing"));

        let err = writer
            .create("Half-Life 2", &dir.path().join("hl2.exe"))
            .unwrap_err();
        match err {
            ShortcutError::WriteFailed { name, fallback, .. } => {
                assert_eq!(name, "Half-Life 2");
                assert_eq!(fallback, "HalfLife2");
            }
            other => panic!("expected WriteFailed, got {other:?}"),
        }
    }

    #[test]
    fn failed_fill_leaves_no_file() {
        let (_dir, writer) = setup();
        let path = writer.shortcut_path("Celeste");

        let err = write_new_with(&path, |_| Err(io::Error::other("disk full"))).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert!(!path.exists());

        let target = writer.output_dir().join("Celeste.exe");
        let outcome = writer.create("Celeste", &target).unwrap();
        assert_eq!(outcome, ShortcutOutcome::Created(path));
    }

    #[test]
    fn relative_target_rejected() {
        let (_dir, writer) = setup();
        let err = writer.create("Celeste", Path::new("Celeste.exe")).unwrap_err();
        assert!(matches!(err, ShortcutError::InvalidTarget(_)));
        assert!(!writer.shortcut_path("Celeste").exists());
    }

    #[test]
    fn identical_fallback_is_not_retried() {
        let dir = TempDir::new().unwrap();
        let writer = ShortcutWriter::new(dir.path().join("missing"));
        let err = writer.create("Celeste", &dir.path().join("c.exe")).unwrap_err();
        assert!(matches!(err, ShortcutError::WriteFailed { .. }));
    }
}

//! Pattern tables and score weights.
//!
//! Both structs deserialize with `#[serde(default)]`, so a config file only
//! needs to name the fields it changes.

use serde::{Deserialize, Serialize};

/// Name and path patterns consulted by [`PathMatcher`](crate::PathMatcher).
///
/// Entries are compared case-insensitively; the matcher lowercases them once
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternTables {
    /// Executable base names (no extension) that are never the game.
    pub blocked_names: Vec<String>,
    /// Substrings that disqualify an executable base name.
    pub blocked_substrings: Vec<String>,
    /// Directory fragments conventionally holding the game binary.
    pub good_dir_fragments: Vec<String>,
    /// Generic base names that usually start the game.
    pub priority_names: Vec<String>,
}

impl Default for PatternTables {
    fn default() -> Self {
        Self {
            blocked_names: to_strings(&[
                "unins000",
                "unins001",
                "uninst",
                "unitycrashhandler32",
                "unitycrashhandler64",
                "crashreportclient",
                "crashpad_handler",
                "vc_redist.x64",
                "vc_redist.x86",
                "vcredist_x64",
                "vcredist_x86",
                "vcredist",
                "dxsetup",
                "dxwebsetup",
                "dotnetfx",
                "ndp472-kb4054530-x86-x64-allos-enu",
                "oalinst",
                "physxupdateloader",
                "ue4prereqsetup_x64",
                "ueprereqsetup_x64",
                "easyanticheat",
                "easyanticheat_eos_setup",
                "beservice",
                "dowser",
                "notification_helper",
                "quicksfv",
                "7z",
                "7za",
                "python",
                "pythonw",
                "cefsharp.browsersubprocess",
                "zfgamebrowser",
            ]),
            blocked_substrings: to_strings(&[
                "uninstall",
                "setup",
                "settings",
                "helper",
                "config",
                "launcher",
                "language",
                "crash",
                "test",
                "service",
                "server",
                "update",
                "install",
            ]),
            good_dir_fragments: to_strings(&[
                "bin", "binaries", "game", "app", "win64", "win32", "windows", "x64", "x86",
            ]),
            priority_names: to_strings(&["start", "play", "run", "main", "bin"]),
        }
    }
}

impl PatternTables {
    /// Appends extra exact-match names to the blacklist.
    pub fn extend_blocked_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_names.extend(names.into_iter().map(Into::into));
    }

    /// Appends extra bad substrings.
    pub fn extend_blocked_substrings<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_substrings
            .extend(patterns.into_iter().map(Into::into));
    }
}

/// Bonuses, penalties and fixed scores used by [`Scorer`](crate::Scorer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Score for a base name equal to the folder display name.
    pub exact_match: i32,
    /// Score for `<folder>-win64-shipping`. Must stay below `exact_match`.
    pub shipping_match: i32,
    /// Name contains the folder name, `win64` and `shipping`.
    pub shipping_combo: i32,
    /// Name contains `game`.
    pub contains_game: i32,
    /// Name contains the folder name.
    pub contains_name: i32,
    /// Per folder-name word (longer than 3 chars) found in the name.
    pub word_match: i32,
    /// Name is one of the priority names.
    pub priority_name: i32,
    /// Parent directory contains a good-path fragment.
    pub good_directory: i32,
    /// Subtracted when the depth exceeds `depth_threshold`.
    pub depth_penalty: i32,
    /// Depth (relative to the search root) tolerated without penalty.
    pub depth_threshold: usize,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            exact_match: 10_000,
            shipping_match: 5_000,
            shipping_combo: 500,
            contains_game: 200,
            contains_name: 150,
            word_match: 25,
            priority_name: 50,
            good_directory: 50,
            depth_penalty: 10,
            depth_threshold: 4,
        }
    }
}

impl ScoreWeights {
    /// Highest score the accumulation rules may produce.
    pub fn accumulation_ceiling(&self) -> i32 {
        self.shipping_match.min(self.exact_match) - 1
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

//! Block/allow classification of executable names.

use std::fmt;
use std::path::Path;

use crate::patterns::PatternTables;

/// Why an executable name was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// The whole base name is on the blacklist.
    ExactName(String),
    /// The base name contains a bad substring.
    Substring(String),
}

impl BlockReason {
    /// The pattern that triggered the block.
    pub fn pattern(&self) -> &str {
        match self {
            Self::ExactName(p) | Self::Substring(p) => p,
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactName(p) => write!(f, "blacklisted name '{p}'"),
            Self::Substring(p) => write!(f, "contains '{p}'"),
        }
    }
}

/// Result of classifying an executable base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Allowed,
    Blocked(BlockReason),
}

impl Classification {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}

/// Matches executable names and locations against [`PatternTables`].
#[derive(Debug, Clone)]
pub struct PathMatcher {
    blocked_names: Vec<String>,
    blocked_substrings: Vec<String>,
    good_dir_fragments: Vec<String>,
    priority_names: Vec<String>,
}

impl Default for PathMatcher {
    fn default() -> Self {
        Self::new(&PatternTables::default())
    }
}

impl PathMatcher {
    /// Builds a matcher, lowercasing every pattern once.
    pub fn new(tables: &PatternTables) -> Self {
        Self {
            blocked_names: lowercase_all(&tables.blocked_names),
            blocked_substrings: lowercase_all(&tables.blocked_substrings),
            good_dir_fragments: lowercase_all(&tables.good_dir_fragments),
            priority_names: lowercase_all(&tables.priority_names),
        }
    }

    /// Classifies an executable base name (without extension).
    ///
    /// The exact blacklist is checked before the substring list, so the
    /// reported reason is the most specific one.
    pub fn classify(&self, name_no_ext: &str) -> Classification {
        let name = name_no_ext.to_lowercase();

        if let Some(hit) = self.blocked_names.iter().find(|b| **b == name) {
            return Classification::Blocked(BlockReason::ExactName(hit.clone()));
        }

        if let Some(hit) = self
            .blocked_substrings
            .iter()
            .find(|s| name.contains(s.as_str()))
        {
            return Classification::Blocked(BlockReason::Substring(hit.clone()));
        }

        Classification::Allowed
    }

    /// Returns `true` if the executable's parent directory path contains a
    /// conventional game-binary fragment anywhere.
    pub fn is_in_good_directory(&self, exe_path: &Path) -> bool {
        let Some(parent) = exe_path.parent() else {
            return false;
        };
        let parent = parent.to_string_lossy().to_lowercase();
        self.good_dir_fragments
            .iter()
            .any(|frag| parent.contains(frag.as_str()))
    }

    /// Returns `true` if the (lowercase) base name is a priority name.
    pub fn is_priority_name(&self, name_lower: &str) -> bool {
        self.priority_names.iter().any(|p| p == name_lower)
    }
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

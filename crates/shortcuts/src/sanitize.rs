//! Filesystem-safe shortcut names.

/// Longest shortcut name, without extension.
pub const MAX_NAME_LEN: usize = 60;

const ELLIPSIS: &str = "...";
const DEFAULT_NAME: &str = "Game";
const ILLEGAL: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
const RESERVED: &[&str] = &[
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8",
    "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Turns a game display name into a file name stem.
///
/// `&` becomes `and`, characters Windows rejects are dropped, whitespace is
/// collapsed and names longer than `max_len` end in `...`.
pub fn sanitize_name(name: &str, max_len: usize) -> String {
    let cleaned: String = name
        .replace('&', "and")
        .chars()
        .filter(|c| !ILLEGAL.contains(c) && !c.is_control())
        .collect();

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_end_matches(['.', ' ']);

    finish(truncate_with_ellipsis(trimmed, max_len))
}

/// ASCII-alphanumeric-only name used when the sanitized name cannot be
/// written.
pub fn fallback_name(name: &str, max_len: usize) -> String {
    let cleaned: String = name
        .replace('&', "and")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(max_len.max(1))
        .collect();

    finish(cleaned)
}

fn truncate_with_ellipsis(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }

    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let head: String = name.chars().take(keep).collect();
    format!("{}{ELLIPSIS}", head.trim_end())
}

fn finish(name: String) -> String {
    if name.is_empty() {
        return DEFAULT_NAME.to_string();
    }
    if RESERVED.contains(&name.to_lowercase().as_str()) {
        return format!("{name}_");
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_illegal_characters() {
        assert_eq!(
            sanitize_name("Shadow: Rebirth? <Deluxe>", MAX_NAME_LEN),
            "Shadow Rebirth Deluxe"
        );
        assert_eq!(sanitize_name("AC/DC|Live*", MAX_NAME_LEN), "ACDCLive");
    }

    #[test]
    fn replaces_ampersand() {
        assert_eq!(sanitize_name("Tom & Jerry", MAX_NAME_LEN), "Tom and Jerry");
    }

    #[test]
    fn collapses_whitespace_and_trailing_dots() {
        assert_eq!(sanitize_name("  Spaced \t Out...  ", MAX_NAME_LEN), "Spaced Out");
    }

    #[test]
    fn truncates_with_ellipsis() {
        let long = "A".repeat(100);
        let name = sanitize_name(&long, 20);
        assert_eq!(name.chars().count(), 20);
        assert!(name.ends_with("..."));
    }

    #[test]
    fn short_names_untouched() {
        assert_eq!(sanitize_name("Celeste", MAX_NAME_LEN), "Celeste");
    }

    #[test]
    fn empty_becomes_default() {
        assert_eq!(sanitize_name("???", MAX_NAME_LEN), "Game");
        assert_eq!(fallback_name("!!!", MAX_NAME_LEN), "Game");
    }

    #[test]
    fn reserved_device_names_are_suffixed() {
        assert_eq!(sanitize_name("CON", MAX_NAME_LEN), "CON_");
        assert_eq!(fallback_name("nul", MAX_NAME_LEN), "nul_");
    }

    #[test]
    fn fallback_keeps_ascii_alphanumerics() {
        assert_eq!(fallback_name("Half-Life 2: Episode Ōne", MAX_NAME_LEN), "HalfLife2Episodene");
        assert_eq!(fallback_name("Rock & Roll", MAX_NAME_LEN), "RockandRoll");
        assert_eq!(fallback_name(&"x".repeat(90), 10).len(), 10);
    }
}

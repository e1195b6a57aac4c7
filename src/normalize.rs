//! Deck name to filename conversion.
//!
//! [`normalize_name`] strips emoji, removes leaked `\uXXXX` escape text, and
//! sanitizes the rest so it is a valid single path segment on Windows, macOS
//! and Linux. The result is never empty and normalizing it again is a no-op.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::FALLBACK_FILENAME;

/// Longest filename we emit, in bytes, leaving room for the `.cod` extension.
pub const MAX_NAME_BYTES: usize = 250;

/// Keycap sequences (`1️⃣`), flags, pictographs with their modifiers, and the
/// joiners/selectors that glue multi-codepoint emoji together.
static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[0-9#*]\x{FE0F}?\x{20E3}",
        r"|[\x{1F1E6}-\x{1F1FF}]",
        r"|\p{Extended_Pictographic}",
        r"|[\x{1F3FB}-\x{1F3FF}]",
        r"|[\x{200D}\x{FE0E}\x{FE0F}\x{20E3}\x{E0020}-\x{E007F}]",
    ))
    .expect("emoji pattern is valid")
});

static UNICODE_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\u[0-9a-fA-F]{4}").expect("escape pattern is valid"));

/// Path separators, characters Windows rejects, and control characters.
static ILLEGAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[/\\?<>:*|"\x00-\x1F\x7F\x{80}-\x{9F}]"#).expect("illegal pattern is valid")
});

/// Windows device names as the stem, with or without an extension.
static RESERVED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(con|prn|aux|nul|com[0-9¹²³]|lpt[0-9¹²³])(\..*)?$")
        .expect("reserved pattern is valid")
});

pub fn strip_emoji(title: &str) -> String {
    EMOJI.replace_all(title, "").into_owned()
}

pub fn strip_unicode_escapes(title: &str) -> String {
    UNICODE_ESCAPE.replace_all(title, "").into_owned()
}

/// One sanitizing pass. Removing characters can expose a new problem
/// (`CO/N` becomes `CON`, then `CON_`), so [`sanitize_filename`] repeats
/// this until stable.
fn sanitize_pass(name: &str) -> String {
    let name = ILLEGAL.replace_all(name, "");
    let name = name.trim();
    let name = name.trim_end_matches(['.', ' ']);
    if name.chars().all(|c| c == '.') {
        return String::new();
    }
    // `CON` becomes `CON_`, `nul.txt` becomes `nul_.txt`
    let name = RESERVED.replace(name, "${1}_${2}");
    truncate_to_boundary(&name, MAX_NAME_BYTES).to_string()
}

fn truncate_to_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Make `name` usable as a filename on every major OS. May return an empty
/// string.
pub fn sanitize_filename(name: &str) -> String {
    let mut current = name.to_string();
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Filesystem-safe, emoji-free base filename for a deck title.
pub fn normalize_name(title: &str) -> String {
    let name = strip_emoji(title);
    let name = strip_unicode_escapes(&name);
    let name = sanitize_filename(&name);
    if name.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        name
    }
}

//! Free-text normalization for menu and shopping input.
//!
//! # Responsibility
//! - Convert raw multi-line input into canonical bulleted lines.
//! - Strip bullet markers when reading stored lines back as items.
//!
//! # Invariants
//! - `normalize_lines` never fails and is idempotent.
//! - Every stored non-empty line carries exactly one `BULLET_MARKER`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix placed in front of every stored line.
pub const BULLET_MARKER: char = '・';

static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("valid line break regex"));

/// Splits text on any line break convention.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    LINE_BREAK_RE.split(text)
}

/// Trims one line and removes any leading bullet markers.
///
/// Returns an empty string for blank or marker-only lines.
pub fn strip_bullet(line: &str) -> &str {
    line.trim().trim_start_matches(BULLET_MARKER).trim()
}

/// Normalizes raw input into bulleted lines joined by `\n`.
///
/// Rules:
/// - lines are trimmed and existing bullet markers are removed first;
/// - blank lines are dropped;
/// - survivors are prefixed with `BULLET_MARKER`.
pub fn normalize_lines(raw: &str) -> String {
    split_lines(raw)
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .map(|line| format!("{BULLET_MARKER}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

//! Line and word segmentation for the diff engine

use std::sync::OnceLock;
use regex::Regex;

/// Whitespace as ECMAScript's `\s` defines it: ASCII spacing, the Unicode
/// space separators, line and paragraph separators, and the byte order mark.
/// U+0085 (NEL) is not included.
const WHITESPACE_CLASS: &str = r"[\t\n\x0B\x0C\r \x{00A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+";

fn whitespace_run() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(WHITESPACE_CLASS).expect("static whitespace pattern is valid"))
}

/// Split a text blob into lines on `\n`.
///
/// Carriage returns are kept as part of the line, an empty blob yields a
/// single empty line, and a trailing newline yields a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Split a line into words on runs of whitespace.
///
/// Leading or trailing whitespace produces an empty leading or trailing word,
/// and an empty line produces a single empty word.
pub fn split_words(line: &str) -> Vec<&str> {
    whitespace_run().split(line).collect()
}

/// Number of lines `split_lines` produces for `text`
pub fn count_lines(text: &str) -> usize {
    split_lines(text).len()
}

//! Positional line comparison.
//!
//! Lines are paired by index, not aligned by a common subsequence. Two
//! near-identical documents compare cheaply, but a single inserted or deleted
//! line shifts every later pair and shows up as a run of modified lines
//! followed by an added or removed tail.

use super::report::{DiffReport, LineChange, ReportBuilder};
use super::tokenize::split_lines;
use super::words::diff_words;

/// Classify one position given the base and candidate line at that index
fn classify(base: Option<&str>, candidate: Option<&str>) -> Option<LineChange> {
    let change = match (base, candidate) {
        (None, None) => return None,
        (None, Some(new)) => LineChange::Added { content: new.to_string() },
        (Some(old), None) => LineChange::Removed { content: old.to_string() },
        (Some(old), Some(new)) if old != new => LineChange::Modified {
            old: old.to_string(),
            new: new.to_string(),
            word_diff: diff_words(old, new),
        },
        (Some(same), Some(_)) => LineChange::Unchanged { content: same.to_string() },
    };
    Some(change)
}

/// Compare `candidate` against `base` line by line.
///
/// The report has one entry per position up to the longer of the two line
/// counts, numbered from 1.
pub fn diff_lines(base: &str, candidate: &str) -> DiffReport {
    let base_lines = split_lines(base);
    let candidate_lines = split_lines(candidate);
    let len = base_lines.len().max(candidate_lines.len());

    let mut builder = ReportBuilder::with_capacity(len);
    for i in 0..len {
        if let Some(change) = classify(base_lines.get(i).copied(), candidate_lines.get(i).copied()) {
            builder.push(change);
        }
    }

    builder.finish()
}

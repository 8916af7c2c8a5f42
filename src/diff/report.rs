//! Diff report types and the builder that assembles them

use serde::{Deserialize, Serialize};

use super::words::WordDiffEntry;

/// Classification of one line position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LineChange {
    /// Same content on both sides
    Unchanged { content: String },
    /// Line exists only in the candidate
    Added { content: String },
    /// Line exists only in the base
    Removed { content: String },
    /// Both sides have a line at this position but the content differs
    Modified {
        old: String,
        new: String,
        #[serde(rename = "wordDiff")]
        word_diff: Vec<WordDiffEntry>,
    },
}

impl LineChange {
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Unchanged { .. } => ChangeKind::Unchanged,
            Self::Added { .. } => ChangeKind::Added,
            Self::Removed { .. } => ChangeKind::Removed,
            Self::Modified { .. } => ChangeKind::Modified,
        }
    }
}

/// Discriminant of [`LineChange`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Unchanged,
    Added,
    Removed,
    Modified,
}

/// A classified line together with its 1-based position in the comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDiffEntry {
    pub line_number: usize,
    #[serde(flatten)]
    pub change: LineChange,
}

/// Per-kind line counts of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl ReportStats {
    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.modified
    }

    pub fn total_lines(&self) -> usize {
        self.total_changes() + self.unchanged
    }
}

/// Complete result of comparing one candidate against the base.
///
/// Owns copies of every line and word, so it outlives the compared texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffReport {
    #[serde(rename = "diff")]
    pub entries: Vec<LineDiffEntry>,
    pub change_count: usize,
    pub summary: String,
}

impl DiffReport {
    /// True when every entry is unchanged
    pub fn is_identical(&self) -> bool {
        self.change_count == 0
    }

    pub fn stats(&self) -> ReportStats {
        self.entries.iter().fold(ReportStats::default(), |mut stats, entry| {
            match entry.change.kind() {
                ChangeKind::Unchanged => stats.unchanged += 1,
                ChangeKind::Added => stats.added += 1,
                ChangeKind::Removed => stats.removed += 1,
                ChangeKind::Modified => stats.modified += 1,
            }
            stats
        })
    }

    /// Entries that are not unchanged
    pub fn changes(&self) -> impl Iterator<Item = &LineDiffEntry> {
        self.entries.iter().filter(|e| e.change.is_change())
    }
}

/// Summary text for a change count
pub fn summarize(change_count: usize) -> String {
    format!("{} diffs", change_count)
}

/// Accumulates classified lines into a [`DiffReport`]
#[derive(Debug, Default)]
pub struct ReportBuilder {
    entries: Vec<LineDiffEntry>,
    change_count: usize,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            change_count: 0,
        }
    }

    /// Append the next line; line numbers are assigned in push order starting at 1.
    pub fn push(&mut self, change: LineChange) -> &mut Self {
        if change.is_change() {
            self.change_count += 1;
        }
        self.entries.push(LineDiffEntry {
            line_number: self.entries.len() + 1,
            change,
        });
        self
    }

    pub fn finish(self) -> DiffReport {
        DiffReport {
            summary: summarize(self.change_count),
            entries: self.entries,
            change_count: self.change_count,
        }
    }
}

//! Word-level diff for a single modified line

use serde::{Deserialize, Serialize};

use super::lcs::lcs;
use super::tokenize::split_words;

/// One word of a word-level edit script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WordDiffEntry {
    Unchanged { word: String },
    Added { word: String },
    Removed { word: String },
}

impl WordDiffEntry {
    pub fn word(&self) -> &str {
        match self {
            Self::Unchanged { word } | Self::Added { word } | Self::Removed { word } => word,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged { .. })
    }

    /// True for words that belong to the old line (unchanged or removed)
    pub fn in_old(&self) -> bool {
        !matches!(self, Self::Added { .. })
    }

    /// True for words that belong to the new line (unchanged or added)
    pub fn in_new(&self) -> bool {
        !matches!(self, Self::Removed { .. })
    }
}

/// Diff two lines word by word.
///
/// Words are matched against the common subsequence by value: for each common
/// word the old cursor emits removals until it reaches a word equal to it, then
/// the new cursor emits additions the same way. When a value repeats, the first
/// equal word at or after each cursor is taken as the match.
pub fn diff_words(old_line: &str, new_line: &str) -> Vec<WordDiffEntry> {
    let old_words = split_words(old_line);
    let new_words = split_words(new_line);
    let common = lcs(&old_words, &new_words);

    let mut result = Vec::with_capacity(old_words.len() + new_words.len());
    let (mut p1, mut p2) = (0usize, 0usize);

    for word in common {
        while p1 < old_words.len() && old_words[p1] != word {
            result.push(WordDiffEntry::Removed { word: old_words[p1].to_string() });
            p1 += 1;
        }
        while p2 < new_words.len() && new_words[p2] != word {
            result.push(WordDiffEntry::Added { word: new_words[p2].to_string() });
            p2 += 1;
        }
        result.push(WordDiffEntry::Unchanged { word: word.to_string() });
        p1 += 1;
        p2 += 1;
    }

    result.extend(
        old_words
            .iter()
            .skip(p1)
            .map(|w| WordDiffEntry::Removed { word: w.to_string() }),
    );
    result.extend(
        new_words
            .iter()
            .skip(p2)
            .map(|w| WordDiffEntry::Added { word: w.to_string() }),
    );

    result
}

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::report::{DiffReport, LineChange};
use super::words::WordDiffEntry;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Output formats for rendered reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffFormat {
    /// Line-by-line listing with markers
    #[default]
    Text,
    /// Serialized reports for scripting
    Json,
    /// One summary line per candidate
    Compact,
}

/// Options for the text renderer
#[derive(Debug, Clone, Copy)]
pub struct TextOptions {
    /// Emit ANSI colors
    pub color: bool,
    /// Show the word-level diff under each modified line
    pub word_diff: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            color: false,
            word_diff: true,
        }
    }
}

/// Renders diff reports into text
pub struct DiffFormatter;

impl DiffFormatter {
    /// Full line listing of a report, headed by both document names and the summary
    pub fn format_text(
        report: &DiffReport,
        base_name: &str,
        candidate_name: &str,
        options: TextOptions,
    ) -> String {
        let mut output = Vec::with_capacity(report.entries.len() + 3);
        output.push(format!("--- {}", base_name));
        output.push(format!("+++ {}", candidate_name));
        output.push(format!("({})", report.summary));

        for entry in &report.entries {
            let n = entry.line_number;
            match &entry.change {
                LineChange::Unchanged { content } => {
                    output.push(format!("{:>4}   {}", n, content));
                }
                LineChange::Added { content } => {
                    output.push(Self::paint(format!("{:>4} + {}", n, content), GREEN, options.color));
                }
                LineChange::Removed { content } => {
                    output.push(Self::paint(format!("{:>4} - {}", n, content), RED, options.color));
                }
                LineChange::Modified { old, new, word_diff } => {
                    output.push(Self::paint(format!("{:>4} - {}", n, old), RED, options.color));
                    output.push(Self::paint(format!("{:>4} + {}", n, new), GREEN, options.color));
                    if options.word_diff {
                        output.push(format!("     ~ {}", Self::format_word_diff(word_diff, options.color)));
                    }
                }
            }
        }

        output.join("\n")
    }

    /// Inline word diff, `[-removed-]` and `{+added+}` when uncolored
    pub fn format_word_diff(words: &[WordDiffEntry], color: bool) -> String {
        words
            .iter()
            .map(|entry| match (entry, color) {
                (WordDiffEntry::Unchanged { word }, _) => word.clone(),
                (WordDiffEntry::Added { word }, true) => format!("{}{}{}", GREEN, word, RESET),
                (WordDiffEntry::Removed { word }, true) => format!("{}{}{}{}", RED, DIM, word, RESET),
                (WordDiffEntry::Added { word }, false) => format!("{{+{}+}}", word),
                (WordDiffEntry::Removed { word }, false) => format!("[-{}-]", word),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Single line: candidate name and summary
    pub fn format_compact(report: &DiffReport, candidate_name: &str) -> String {
        format!("{}: {}", candidate_name, report.summary)
    }

    pub fn format_json(report: &DiffReport) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(report)
    }

    /// Per-kind breakdown of a report
    pub fn format_stats(report: &DiffReport) -> String {
        let stats = report.stats();

        if stats.total_changes() == 0 {
            return "No changes".to_string();
        }

        let mut parts = Vec::new();
        for (count, label) in [
            (stats.modified, "modified"),
            (stats.added, "added"),
            (stats.removed, "removed"),
        ] {
            if count > 0 {
                parts.push(format!("{} {}", count, label));
            }
        }

        parts.join(", ")
    }

    fn paint(line: String, color: &str, enabled: bool) -> String {
        if enabled {
            format!("{}{}{}", color, line, RESET)
        } else {
            line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::lines::diff_lines;

    #[test]
    fn test_format_text_plain() {
        let report = diff_lines("a\nb\nc", "a\nx\nc\nd");
        let formatted = DiffFormatter::format_text(&report, "base.txt", "other.txt", TextOptions::default());

        assert!(formatted.starts_with("--- base.txt\n+++ other.txt\n(2 diffs)"));
        assert!(formatted.contains("   1   a"));
        assert!(formatted.contains("   2 - b"));
        assert!(formatted.contains("   2 + x"));
        assert!(formatted.contains("~ [-b-] {+x+}"));
        assert!(formatted.contains("   4 + d"));
        assert!(!formatted.contains('\x1b'));
    }

    #[test]
    fn test_format_text_without_word_diff() {
        let report = diff_lines("a b", "a c");
        let options = TextOptions { color: false, word_diff: false };
        let formatted = DiffFormatter::format_text(&report, "a", "b", options);

        assert!(!formatted.contains('~'));
    }

    #[test]
    fn test_format_text_colored() {
        let report = diff_lines("a", "b");
        let options = TextOptions { color: true, word_diff: true };
        let formatted = DiffFormatter::format_text(&report, "a", "b", options);

        assert!(formatted.contains(GREEN));
        assert!(formatted.contains(RED));
    }

    #[test]
    fn test_format_compact() {
        let report = diff_lines("a\nb", "a\nc");
        assert_eq!(DiffFormatter::format_compact(&report, "run-2.md"), "run-2.md: 1 diffs");
    }

    #[test]
    fn test_format_stats() {
        let report = diff_lines("a\nb\nc", "a\nc");
        assert_eq!(DiffFormatter::format_stats(&report), "1 modified, 1 removed");

        let same = diff_lines("a", "a");
        assert_eq!(DiffFormatter::format_stats(&same), "No changes");
    }

    #[test]
    fn test_format_json() {
        let report = diff_lines("a", "a\nb");
        let json = DiffFormatter::format_json(&report).unwrap();

        assert!(json.contains("\"changeCount\": 1"));
        assert!(json.contains("\"type\": \"added\""));
    }
}

//! Diff engine
//!
//! Pure functions that compare a base text against a candidate text. Lines
//! are paired positionally; each modified pair is further diffed word by word
//! over a longest common subsequence. Nothing here holds state or performs
//! I/O, so reports for different candidates can be computed independently.

pub mod tokenize;
pub mod lcs;
pub mod words;
pub mod lines;
pub mod report;
pub mod formatter;

// Re-export the main types for easier use
pub use tokenize::{split_lines, split_words, count_lines};
pub use lcs::{lcs, lcs_len};
pub use words::{diff_words, WordDiffEntry};
pub use lines::diff_lines;
pub use report::{
    summarize, ChangeKind, DiffReport, LineChange, LineDiffEntry, ReportBuilder, ReportStats,
};
pub use formatter::{DiffFormat, DiffFormatter, TextOptions};

/// Convenience function to render a text diff with default options
pub fn generate_text_diff(base: &str, candidate: &str, base_name: &str, candidate_name: &str) -> String {
    let report = diff_lines(base, candidate);
    DiffFormatter::format_text(&report, base_name, candidate_name, TextOptions::default())
}

/// Convenience function to get report statistics
pub fn get_diff_stats(base: &str, candidate: &str) -> ReportStats {
    diff_lines(base, candidate).stats()
}

use std::path::PathBuf;
use clap::Parser;

use crate::config::OutputDiffConfig;
use crate::diff::{DiffFormat, TextOptions};

#[derive(Parser, Debug)]
#[command(name = "outputdiff")]
#[command(author = "OutputDiff Team")]
#[command(version = "0.1.0")]
#[command(about = "Compare several text outputs against a chosen base document")]
#[command(long_about = "OutputDiff loads two or more text documents, picks one as the base, and reports for every other document which lines were added, removed or modified, with word-level detail for modified lines. Lines are compared by position.")]
pub struct Cli {
    /// Files or directories to compare, in order
    #[arg(value_name = "PATHS", required = true, help = "Documents to compare (directories are expanded)")]
    pub paths: Vec<PathBuf>,

    /// Index of the base document among the loaded documents
    #[arg(short, long, value_name = "INDEX", help = "Zero-based index of the base document (defaults to the first)")]
    pub base: Option<usize>,

    /// Output format
    #[arg(short, long, default_value = "text", help = "Output format")]
    pub format: DiffFormat,

    /// Only print the summary line for each candidate
    #[arg(long, help = "Collapse reports to their summary line")]
    pub collapse: bool,

    /// Hide the word-level diff under modified lines
    #[arg(long, help = "Do not show word-level changes")]
    pub no_word_diff: bool,

    /// Disable colors in output
    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Write the comparison to a file instead of stdout
    #[arg(short, long, value_name = "FILE", help = "Write output to a file")]
    pub output: Option<PathBuf>,

    /// Recompute whenever an input changes
    #[arg(short, long, help = "Watch inputs and recompare on change")]
    pub watch: bool,
}

impl Cli {
    pub fn setup_logging(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }

    pub fn validate(&self) -> Result<(), String> {
        for path in &self.paths {
            if !path.exists() {
                return Err(format!("Path does not exist: {}", path.display()));
            }
        }

        if self.watch && self.output.is_some() {
            return Err("--watch cannot be combined with --output".to_string());
        }

        Ok(())
    }

    /// Text rendering options from flags layered over the configuration
    pub fn text_options(&self, config: &OutputDiffConfig) -> TextOptions {
        TextOptions {
            color: config.output.color && !self.no_color && self.output.is_none(),
            word_diff: config.output.word_diff && !self.no_word_diff,
        }
    }
}

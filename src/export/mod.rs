//! Export functionality for saving comparison results
//!
//! This module writes every candidate's report, together with the name of the
//! base document, to files or other outputs in any [`DiffFormat`].

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ComparisonSession;
use crate::diff::{DiffFormat, DiffFormatter, DiffReport, TextOptions};
use crate::error::{CompareError, Result};

/// Export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub format: DiffFormat,
    pub include_metadata: bool,
    pub text: TextOptions,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: DiffFormat::Text,
            include_metadata: true,
            text: TextOptions::default(),
        }
    }
}

/// One candidate's report as it appears in an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub index: usize,
    pub name: String,
    /// Collapsed reports render as their summary line only
    #[serde(default)]
    pub expanded: bool,
    pub report: DiffReport,
}

/// Serializable snapshot of a whole comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonExport {
    pub base: String,
    pub generated_at: DateTime<Utc>,
    pub comparisons: Vec<CandidateReport>,
}

impl ComparisonExport {
    /// Pair each report with its document name. Reports whose index no longer
    /// exists in the session are dropped.
    pub fn from_session(session: &ComparisonSession, reports: &BTreeMap<usize, DiffReport>) -> Result<Self> {
        let base = session.base().ok_or(CompareError::NoDocuments)?;

        let comparisons = reports
            .iter()
            .filter_map(|(&index, report)| {
                session.document(index).map(|doc| CandidateReport {
                    index,
                    name: doc.name().to_string(),
                    expanded: session.is_expanded(index),
                    report: report.clone(),
                })
            })
            .collect();

        Ok(Self {
            base: base.name().to_string(),
            generated_at: Utc::now(),
            comparisons,
        })
    }
}

/// Handles exporting comparisons to various formats and destinations
pub struct ReportExporter {
    config: ExportConfig,
}

impl ReportExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn with_format(format: DiffFormat) -> Self {
        Self {
            config: ExportConfig {
                format,
                ..Default::default()
            },
        }
    }

    /// Export a comparison to a file
    pub fn export_to_file<P: AsRef<Path>>(&self, export: &ComparisonExport, output_path: P) -> Result<()> {
        let output_path = output_path.as_ref();
        let content = self.render(export)?;
        fs::write(output_path, content).map_err(|e| CompareError::io(output_path, e))?;
        tracing::info!("Wrote {} comparison(s) to {}", export.comparisons.len(), output_path.display());
        Ok(())
    }

    /// Export to a writer (for stdout or custom outputs)
    pub fn export_to_writer<W: Write>(&self, export: &ComparisonExport, writer: &mut W) -> Result<()> {
        let content = self.render(export)?;
        writer
            .write_all(content.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .map_err(CompareError::Write)
    }

    /// Render a comparison in the configured format
    pub fn render(&self, export: &ComparisonExport) -> Result<String> {
        if self.config.format == DiffFormat::Json {
            return Ok(serde_json::to_string_pretty(export)?);
        }

        let mut sections = Vec::new();

        if self.config.include_metadata {
            sections.push(self.format_metadata(export));
        }

        for candidate in &export.comparisons {
            let rendered = match self.config.format {
                DiffFormat::Text if candidate.expanded => DiffFormatter::format_text(
                    &candidate.report,
                    &export.base,
                    &candidate.name,
                    self.config.text,
                ),
                _ => DiffFormatter::format_compact(&candidate.report, &candidate.name),
            };
            sections.push(rendered);
        }

        let separator = if self.config.format == DiffFormat::Compact { "\n" } else { "\n\n" };
        Ok(sections.join(separator))
    }

    fn format_metadata(&self, export: &ComparisonExport) -> String {
        format!(
            "Base: {}\nCandidates: {}\nGenerated at: {}",
            export.base,
            export.comparisons.len(),
            export.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use crate::core::{DiffCache, Document};

    fn sample_export() -> ComparisonExport {
        let mut session = ComparisonSession::new();
        session.add_documents(vec![
            Document::new("base.md", "a\nb\nc"),
            Document::new("run-1.md", "a\nx\nc"),
            Document::new("run-2.md", "a\nb\nc"),
        ]);
        session.set_expanded(1, true);
        let reports = session.compute_diffs(&mut DiffCache::default());
        ComparisonExport::from_session(&session, &reports).unwrap()
    }

    #[test]
    fn test_from_session_names_candidates() {
        let export = sample_export();

        assert_eq!(export.base, "base.md");
        assert_eq!(export.comparisons.len(), 2);
        assert_eq!(export.comparisons[0].name, "run-1.md");
        assert_eq!(export.comparisons[0].report.change_count, 1);
        assert_eq!(export.comparisons[1].index, 2);
        assert!(export.comparisons[0].expanded);
        assert!(!export.comparisons[1].expanded);
    }

    #[test]
    fn test_from_empty_session() {
        let session = ComparisonSession::new();
        let result = ComparisonExport::from_session(&session, &BTreeMap::new());
        assert!(matches!(result, Err(CompareError::NoDocuments)));
    }

    #[test]
    fn test_render_compact() {
        let exporter = ReportExporter::new(ExportConfig {
            format: DiffFormat::Compact,
            include_metadata: false,
            text: TextOptions::default(),
        });
        let rendered = exporter.render(&sample_export()).unwrap();

        assert_eq!(rendered, "run-1.md: 1 diffs\nrun-2.md: 0 diffs");
    }

    #[test]
    fn test_render_json_round_trips() {
        let export = sample_export();
        let rendered = ReportExporter::with_format(DiffFormat::Json).render(&export).unwrap();
        let parsed: ComparisonExport = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed, export);
    }

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("comparison.txt");

        ReportExporter::with_format(DiffFormat::Text)
            .export_to_file(&sample_export(), &output_path)
            .unwrap();

        let content = fs::read_to_string(output_path).unwrap();
        assert!(content.starts_with("Base: base.md"));
        assert!(content.contains("+++ run-1.md"));
        assert!(content.contains("   2 + x"));
        // Collapsed candidates keep only their summary line.
        assert!(content.ends_with("run-2.md: 0 diffs"));
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_export_to_failing_writer() {
        let result = ReportExporter::with_format(DiffFormat::Compact)
            .export_to_writer(&sample_export(), &mut BrokenWriter);

        match result {
            Err(err @ CompareError::Write(_)) => {
                assert_eq!(err.to_string(), "Failed to write output: pipe closed");
            }
            other => panic!("Expected write error, got {:?}", other),
        }
    }

    #[test]
    fn test_export_to_writer() {
        let mut buffer = Vec::new();
        ReportExporter::with_format(DiffFormat::Compact)
            .export_to_writer(&sample_export(), &mut buffer)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Candidates: 2"));
        assert!(text.ends_with("run-2.md: 0 diffs\n"));
    }
}

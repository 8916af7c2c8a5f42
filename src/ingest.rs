use std::path::{Path, PathBuf};
use ignore::WalkBuilder;

use crate::config::IngestConfig;
use crate::core::Document;
use crate::error::{CompareError, Result};

const BOM: char = '\u{FEFF}';

/// Documents read from disk plus the inputs that had to be skipped
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub documents: Vec<Document>,
    pub skipped: Vec<(PathBuf, CompareError)>,
}

/// Reads files and directories into [`Document`]s
pub struct DocumentLoader {
    config: IngestConfig,
}

impl DocumentLoader {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Load every path in order. Directories contribute their files sorted by
    /// path. Unreadable, oversized and non-UTF-8 files are logged and skipped.
    pub fn load_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<LoadOutcome> {
        let mut outcome = LoadOutcome::default();

        for path in paths {
            let path = path.as_ref();
            if path.is_dir() {
                for file in self.collect_files(path)? {
                    let name = file
                        .strip_prefix(path)
                        .unwrap_or(file.as_path())
                        .display()
                        .to_string();
                    self.load_into(&file, name, &mut outcome);
                }
            } else {
                self.load_into(path, display_name(path), &mut outcome);
            }
        }

        tracing::info!(
            "Loaded {} document(s), skipped {}",
            outcome.documents.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }

    /// Read a single file as a document named `name`
    pub fn load_file(&self, path: &Path, name: impl Into<String>) -> Result<Document> {
        let metadata = std::fs::metadata(path).map_err(|e| CompareError::io(path, e))?;
        if metadata.len() > self.config.max_file_bytes {
            return Err(CompareError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: self.config.max_file_bytes,
            });
        }

        let bytes = std::fs::read(path).map_err(|e| CompareError::io(path, e))?;
        let mut content = String::from_utf8(bytes).map_err(|_| CompareError::NotText {
            path: path.to_path_buf(),
        })?;
        if content.starts_with(BOM) {
            content.replace_range(..BOM.len_utf8(), "");
        }

        Ok(Document::new(name, content))
    }

    /// Files under `root`, sorted by path
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(CompareError::io(
                root,
                std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
            ));
        }

        let respect = self.config.respect_gitignore;
        let mut files = Vec::new();

        for result in WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(respect)
            .git_global(respect)
            .git_exclude(respect)
            .ignore(respect)
            .parents(respect)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build()
        {
            match result {
                Ok(entry) => {
                    if entry.file_type().map_or(false, |t| t.is_file()) {
                        files.push(entry.into_path());
                    }
                }
                Err(err) => {
                    tracing::warn!("Error walking directory: {}", err);
                }
            }
        }

        Ok(files)
    }

    fn load_into(&self, path: &Path, name: String, outcome: &mut LoadOutcome) {
        match self.load_file(path, name) {
            Ok(doc) => {
                tracing::debug!("Loaded {} ({} bytes)", doc.name(), doc.content().len());
                outcome.documents.push(doc);
            }
            Err(err) => {
                tracing::warn!("Skipping {}: {}", path.display(), err);
                outcome.skipped.push((path.to_path_buf(), err));
            }
        }
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new(IngestConfig::default())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("answer.txt");
        fs::write(&path, "line one\nline two").unwrap();

        let outcome = DocumentLoader::default().load_paths(&[&path]).unwrap();

        assert_eq!(outcome.documents.len(), 1);
        assert_eq!(outcome.documents[0].name(), "answer.txt");
        assert_eq!(outcome.documents[0].content(), "line one\nline two");
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_byte_order_mark_is_dropped() {
        let dir = TempDir::new().unwrap();
        let with_bom = dir.path().join("with_bom.txt");
        let without_bom = dir.path().join("plain.txt");
        fs::write(&with_bom, "\u{FEFF}hello\nworld").unwrap();
        fs::write(&without_bom, "hello\nworld").unwrap();

        let outcome = DocumentLoader::default()
            .load_paths(&[&with_bom, &without_bom])
            .unwrap();
        assert_eq!(outcome.documents[0].content(), "hello\nworld");

        let report = crate::diff::diff_lines(
            outcome.documents[0].content(),
            outcome.documents[1].content(),
        );
        assert_eq!(report.change_count, 0);
    }

    #[test]
    fn test_only_leading_byte_order_mark_is_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inner.txt");
        fs::write(&path, "a\u{FEFF}b").unwrap();

        let doc = DocumentLoader::default().load_file(&path, "inner.txt").unwrap();
        assert_eq!(doc.content(), "a\u{FEFF}b");
    }

    #[test]
    fn test_non_utf8_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.bin");
        fs::write(&good, "ok").unwrap();
        fs::write(&bad, [0xffu8, 0xfe, 0x00]).unwrap();

        let outcome = DocumentLoader::default().load_paths(&[&bad, &good]).unwrap();

        assert_eq!(outcome.documents.len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert!(matches!(outcome.skipped[0].1, CompareError::NotText { .. }));
    }

    #[test]
    fn test_oversized_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, "0123456789").unwrap();

        let loader = DocumentLoader::new(IngestConfig {
            max_file_bytes: 4,
            respect_gitignore: true,
        });
        let outcome = loader.load_paths(&[&path]).unwrap();

        assert!(outcome.documents.is_empty());
        assert!(matches!(
            outcome.skipped[0].1,
            CompareError::TooLarge { size: 10, limit: 4, .. }
        ));
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let outcome = DocumentLoader::default()
            .load_paths(&[dir.path().join("missing.txt")])
            .unwrap();

        assert!(outcome.documents.is_empty());
        assert!(matches!(outcome.skipped[0].1, CompareError::Io { .. }));
    }

    #[test]
    fn test_directory_files_sorted_and_named_relative() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("nested").join("c.txt"), "c").unwrap();

        let outcome = DocumentLoader::default().load_paths(&[dir.path()]).unwrap();
        let names: Vec<&str> = outcome.documents.iter().map(Document::name).collect();

        assert_eq!(names.len(), 3);
        assert_eq!(names[0], "a.txt");
        assert_eq!(names[1], "b.txt");
        assert!(names[2].ends_with("c.txt"));
    }

    #[test]
    fn test_collect_files_missing_root() {
        let result = DocumentLoader::default().collect_files(Path::new("/nonexistent/outputdiff"));
        assert!(result.is_err());
    }
}

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A named text blob taking part in a comparison.
///
/// The content never changes after creation; a new version of a file is a new
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    name: String,
    content: String,
    uploaded_at: DateTime<Local>,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_timestamp(name, content, Local::now())
    }

    pub fn with_timestamp(
        name: impl Into<String>,
        content: impl Into<String>,
        uploaded_at: DateTime<Local>,
    ) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            uploaded_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn uploaded_at(&self) -> DateTime<Local> {
        self.uploaded_at
    }

    /// Wall-clock upload time, as shown next to the document name
    pub fn upload_time_label(&self) -> String {
        self.uploaded_at.format("%H:%M:%S").to_string()
    }

    /// Hash of the content, used to key cached reports
    pub fn content_hash(&self) -> u64 {
        content_hash(&self.content)
    }
}

/// Calculate a simple hash of content for cache keys
pub fn content_hash(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_document_accessors() {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        let doc = Document::with_timestamp("answer.md", "hello\nworld", at);

        assert_eq!(doc.name(), "answer.md");
        assert_eq!(doc.content(), "hello\nworld");
        assert_eq!(doc.uploaded_at(), at);
        assert_eq!(doc.upload_time_label(), "09:05:07");
    }

    #[test]
    fn test_content_hash_depends_only_on_content() {
        let a = Document::new("a.txt", "same");
        let b = Document::new("b.txt", "same");
        let c = Document::new("a.txt", "different");

        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
    }
}

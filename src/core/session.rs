//! Caller-owned comparison state.
//!
//! The session keeps the document list, which document is the base, and which
//! reports are expanded for display. The diff engine never sees any of it:
//! every recomputation hands plain text pairs to the engine through a
//! [`DiffCache`].

use std::collections::{BTreeMap, BTreeSet};

use crate::diff::DiffReport;
use crate::error::{CompareError, Result};
use super::cache::DiffCache;
use super::document::Document;

#[derive(Debug, Clone, Default)]
pub struct ComparisonSession {
    documents: Vec<Document>,
    base_index: Option<usize>,
    expanded: BTreeSet<usize>,
}

impl ComparisonSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append documents. If no base is set yet, the first added document becomes the base.
    pub fn add_documents<I>(&mut self, documents: I) -> usize
    where
        I: IntoIterator<Item = Document>,
    {
        let first_new = self.documents.len();
        self.documents.extend(documents);
        let added = self.documents.len() - first_new;

        if self.base_index.is_none() && added > 0 {
            self.base_index = Some(first_new);
            tracing::debug!("Base document set to {}", self.documents[first_new].name());
        }

        tracing::info!("Added {} document(s), {} total", added, self.documents.len());
        added
    }

    pub fn add_document(&mut self, document: Document) {
        self.add_documents(std::iter::once(document));
    }

    pub fn set_base(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.base_index = Some(index);
        tracing::info!("Base document set to {}", self.documents[index].name());
        Ok(())
    }

    /// Remove a document, keeping the base pointing at the same document when
    /// possible. Removing the base itself makes the first remaining document
    /// the new base.
    pub fn remove(&mut self, index: usize) -> Result<Document> {
        self.check_index(index)?;
        let removed = self.documents.remove(index);

        self.base_index = match self.base_index {
            Some(base) if base == index => {
                if self.documents.is_empty() {
                    None
                } else {
                    Some(0)
                }
            }
            Some(base) if index < base => Some(base - 1),
            other => other,
        };

        self.expanded = self
            .expanded
            .iter()
            .filter(|&&i| i != index)
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();

        tracing::info!("Removed document {}", removed.name());
        Ok(removed)
    }

    /// Flip the expanded flag of a report; returns the new state
    pub fn toggle_expanded(&mut self, index: usize) -> bool {
        if self.expanded.remove(&index) {
            false
        } else {
            self.expanded.insert(index);
            true
        }
    }

    pub fn set_expanded(&mut self, index: usize, expanded: bool) {
        if expanded {
            self.expanded.insert(index);
        } else {
            self.expanded.remove(&index);
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn base_index(&self) -> Option<usize> {
        self.base_index
    }

    pub fn base(&self) -> Option<&Document> {
        self.base_index.and_then(|i| self.documents.get(i))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Compare every non-base document against the base.
    ///
    /// Keys are positions in the document list. The map is empty when there is
    /// no base or nothing to compare it with.
    pub fn compute_diffs(&self, cache: &mut DiffCache) -> BTreeMap<usize, DiffReport> {
        let base = match self.base() {
            Some(base) if self.documents.len() > 1 => base,
            _ => return BTreeMap::new(),
        };

        self.documents
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != self.base_index)
            .map(|(index, doc)| (index, cache.get_or_compute(base.content(), doc.content())))
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.documents.len() {
            Ok(())
        } else {
            Err(CompareError::IndexOutOfRange {
                index,
                len: self.documents.len(),
            })
        }
    }
}

//! Core functionality module
//!
//! Contains documents, the comparison session and the report cache

pub mod document;
pub mod cache;
pub mod session;

// Re-export main types
pub use document::{content_hash, Document};
pub use cache::{DiffCache, PairKey};
pub use session::ComparisonSession;

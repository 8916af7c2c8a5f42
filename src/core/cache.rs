use std::num::NonZeroUsize;
use lru::LruCache;

use crate::diff::{diff_lines, DiffReport};
use super::document::content_hash;

/// Key for cached reports: (base content hash, candidate content hash)
pub type PairKey = (u64, u64);

/// Stored report with the texts it was computed from
struct CachedReport {
    base: String,
    candidate: String,
    report: DiffReport,
}

/// LRU cache of diff reports keyed by the content of both documents.
///
/// Reports are pure functions of the two texts, so a hit is valid no matter
/// which document names or indices the texts came from. The hashes only locate
/// an entry; the stored texts must match before a report is reused.
pub struct DiffCache {
    cache: LruCache<PairKey, CachedReport>,
    hits: u64,
    misses: u64,
}

impl DiffCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached report for the pair or compute and store it
    pub fn get_or_compute(&mut self, base: &str, candidate: &str) -> DiffReport {
        let key = (content_hash(base), content_hash(candidate));
        self.get_or_compute_with_key(key, base, candidate)
    }

    fn get_or_compute_with_key(&mut self, key: PairKey, base: &str, candidate: &str) -> DiffReport {
        if let Some(cached) = self.cache.get(&key) {
            if cached.base == base && cached.candidate == candidate {
                self.hits += 1;
                tracing::debug!("Diff cache hit for {:016x}/{:016x}", key.0, key.1);
                return cached.report.clone();
            }
            tracing::debug!("Diff cache collision for {:016x}/{:016x}", key.0, key.1);
        }

        self.misses += 1;
        let started = std::time::Instant::now();
        let report = diff_lines(base, candidate);
        tracing::debug!(
            "Computed diff {:016x}/{:016x} in {:?} ({})",
            key.0,
            key.1,
            started.elapsed(),
            report.summary
        );
        self.cache.put(
            key,
            CachedReport {
                base: base.to_string(),
                candidate: candidate.to_string(),
                report: report.clone(),
            },
        );
        report
    }

    pub fn contains(&self, base: &str, candidate: &str) -> bool {
        self.cache
            .peek(&(content_hash(base), content_hash(candidate)))
            .map_or(false, |cached| cached.base == base && cached.candidate == candidate)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for DiffCache {
    fn default() -> Self {
        Self::new(100)
    }
}

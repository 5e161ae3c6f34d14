//! Analysis Cache
//!
//! Memoizes the derived views keyed on (dataset fingerprint, filter). The views
//! are pure functions of those inputs, so a hit always equals a recomputation.

use crate::model::MetricRecord;
use crate::redundancy::{self, Recommendation, RedundancyGroup};
use crate::scoring::{self, ScoredMetric};
use dashmap::DashMap;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Immutable record snapshot with a content fingerprint.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[MetricRecord]>,
    fingerprint: u64,
}

impl Dataset {
    pub fn new(records: Vec<MetricRecord>) -> Self {
        let mut hasher = DefaultHasher::new();
        records.hash(&mut hasher);

        Self {
            fingerprint: hasher.finish(),
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    dataset: u64,
    filter: String,
}

impl CacheKey {
    fn new(dataset: &Dataset, filter: Option<&str>) -> Self {
        Self {
            dataset: dataset.fingerprint(),
            filter: filter.unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memo tables for the derived views.
///
/// Nothing is evicted: entries grow by one per distinct (dataset, department)
/// selection, which stays small for a single session. Use `clear` to reset.
#[derive(Default)]
pub struct AnalysisCache {
    scored: DashMap<CacheKey, Arc<Vec<ScoredMetric>>>,
    groups: DashMap<u64, Arc<Vec<RedundancyGroup>>>,
    recommendations: DashMap<CacheKey, Arc<Vec<Recommendation>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scored and ranked metrics for a department (or all when `None`/empty).
    pub fn scored(&self, dataset: &Dataset, department: Option<&str>) -> Arc<Vec<ScoredMetric>> {
        let key = CacheKey::new(dataset, department);
        if let Some(hit) = self.scored.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(hit.value());
        }

        debug!("Scoring {} records for {:?}", dataset.len(), department);
        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = Arc::new(scoring::score(dataset.records(), department));
        self.scored.insert(key, Arc::clone(&value));
        value
    }

    /// Redundancy groups over the whole dataset.
    pub fn groups(&self, dataset: &Dataset) -> Arc<Vec<RedundancyGroup>> {
        if let Some(hit) = self.groups.get(&dataset.fingerprint()) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(hit.value());
        }

        debug!("Analyzing redundancy across {} records", dataset.len());
        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = Arc::new(redundancy::analyze(dataset.records()));
        self.groups.insert(dataset.fingerprint(), Arc::clone(&value));
        value
    }

    pub fn recommendations(&self, dataset: &Dataset, department: &str) -> Arc<Vec<Recommendation>> {
        let key = CacheKey::new(dataset, Some(department));
        if let Some(hit) = self.recommendations.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(hit.value());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let groups = self.groups(dataset);
        let value = Arc::new(redundancy::recommend(&groups, department));
        self.recommendations.insert(key, Arc::clone(&value));
        value
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.scored.len() + self.groups.len() + self.recommendations.len(),
        }
    }

    pub fn clear(&self) {
        self.scored.clear();
        self.groups.clear();
        self.recommendations.clear();
    }
}

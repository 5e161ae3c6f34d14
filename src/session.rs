//! Analysis Session
//!
//! Holds one loaded dataset and the user's current department / business goal
//! selection. Every view is recomputed from the immutable snapshot on demand
//! and memoized through `AnalysisCache`.

use crate::browser::{self, BrowserRow, MetricFilter};
use crate::cache::{AnalysisCache, CacheStats, Dataset};
use crate::ingestion::LoadOutcome;
use crate::model::MetricRecord;
use crate::redundancy::{Recommendation, RedundancyGroup};
use crate::scoring::{ScoredMetric, ValueReport};
use std::sync::Arc;
use tracing::{info, warn};

/// Minimum Jaro-Winkler similarity for a department name hint.
const DEPARTMENT_HINT_THRESHOLD: f64 = 0.8;

pub struct AnalysisSession {
    dataset: Dataset,
    departments: Vec<String>,
    selected_department: Option<String>,
    business_goal: String,
    cache: AnalysisCache,
}

impl AnalysisSession {
    /// Start a session; the first department in the data is selected.
    pub fn new(records: Vec<MetricRecord>) -> Self {
        let departments = browser::departments(&records);
        let selected_department = departments.first().cloned();

        Self {
            dataset: Dataset::new(records),
            departments,
            selected_department,
            business_goal: String::new(),
            cache: AnalysisCache::new(),
        }
    }

    pub fn from_outcome(outcome: LoadOutcome) -> Self {
        Self::new(outcome.into_records())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    pub fn selected_department(&self) -> Option<&str> {
        self.selected_department.as_deref()
    }

    pub fn business_goal(&self) -> &str {
        &self.business_goal
    }

    /// Select a department. An empty name clears the selection.
    ///
    /// Names missing from the data are accepted and simply produce empty views.
    pub fn select_department(&mut self, department: impl Into<String>) {
        let department = department.into();
        if department.is_empty() {
            self.selected_department = None;
            return;
        }

        if !self.departments.contains(&department) {
            match self.closest_department(&department) {
                Some(hint) => warn!("Unknown department '{}', did you mean '{}'?", department, hint),
                None => warn!("Unknown department '{}'", department),
            }
        }

        info!("Selected department: {}", department);
        self.selected_department = Some(department);
    }

    pub fn set_business_goal(&mut self, goal: impl Into<String>) {
        self.business_goal = goal.into();
    }

    /// Closest known department name, if any is similar enough.
    pub fn closest_department(&self, name: &str) -> Option<&str> {
        self.departments
            .iter()
            .map(|d| (d, strsim::jaro_winkler(&d.to_lowercase(), &name.to_lowercase())))
            .filter(|(_, similarity)| *similarity >= DEPARTMENT_HINT_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(d, _)| d.as_str())
    }

    /// Browser rows; a filter without a department uses the current selection.
    pub fn overview(&self, filter: &MetricFilter) -> Vec<BrowserRow> {
        let mut filter = filter.clone();
        if filter.department.is_none() {
            filter.department = self.selected_department.clone();
        }
        browser::browse(self.dataset.records(), &filter)
    }

    pub fn scored(&self) -> Arc<Vec<ScoredMetric>> {
        self.cache.scored(&self.dataset, self.selected_department())
    }

    pub fn value_report(&self) -> ValueReport {
        ValueReport::build(&self.scored(), self.selected_department(), Some(self.business_goal.as_str()))
    }

    pub fn redundancy(&self) -> Arc<Vec<RedundancyGroup>> {
        self.cache.groups(&self.dataset)
    }

    pub fn recommendations(&self) -> Arc<Vec<Recommendation>> {
        match self.selected_department() {
            Some(department) => self.cache.recommendations(&self.dataset, department),
            None => Arc::new(Vec::new()),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redundancy::RecommendationKind;
    use crate::scoring::ValueCategory;

    fn record(department: &str, name: &str, used: &str, requested: &str) -> MetricRecord {
        MetricRecord {
            department: department.to_string(),
            metric_name: name.to_string(),
            visible_in_dashboard: "Yes".to_string(),
            used_in_decision_making: used.to_string(),
            executive_requested: requested.to_string(),
            last_reviewed: "Last month".to_string(),
            metric_last_used_for_decision: "Last week".to_string(),
            interpretation_notes: "N/A".to_string(),
        }
    }

    fn session() -> AnalysisSession {
        AnalysisSession::new(vec![
            record("Sales", "Revenue", "Yes", "Yes"),
            record("Marketing", "Revenue", "No", "No"),
            record("Marketing", "Reach", "No", "Yes"),
            record("Operations", "Uptime", "Yes", "No"),
        ])
    }

    #[test]
    fn test_defaults_to_first_department() {
        let s = session();
        assert_eq!(s.departments(), ["Sales", "Marketing", "Operations"]);
        assert_eq!(s.selected_department(), Some("Sales"));
        assert_eq!(s.business_goal(), "");
    }

    #[test]
    fn test_views_follow_selection() {
        let mut s = session();
        s.select_department("Marketing");
        s.set_business_goal("Grow pipeline");

        let scored = s.scored();
        assert_eq!(scored.len(), 2);
        assert!(scored.iter().all(|m| m.record.department == "Marketing"));

        let report = s.value_report();
        assert_eq!(report.business_goal.as_deref(), Some("Grow pipeline"));
        assert_eq!(report.top[0].category, ValueCategory::PotentialVanity);

        let recs = s.recommendations();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::Learn);

        assert_eq!(s.overview(&MetricFilter::default()).len(), 2);
        assert_eq!(s.redundancy().len(), 1);
    }

    #[test]
    fn test_unknown_department_yields_empty_views() {
        let mut s = session();
        s.select_department("Legal");

        assert!(s.scored().is_empty());
        assert!(s.recommendations().is_empty());
        assert!(s.overview(&MetricFilter::default()).is_empty());
        assert_eq!(s.redundancy().len(), 1);
    }

    #[test]
    fn test_cleared_selection_means_all_departments() {
        let mut s = session();
        s.select_department("");

        assert_eq!(s.selected_department(), None);
        assert_eq!(s.scored().len(), 4);
        assert!(s.recommendations().is_empty());
    }

    #[test]
    fn test_closest_department_hint() {
        let s = session();
        assert_eq!(s.closest_department("marketng"), Some("Marketing"));
        assert_eq!(s.closest_department("Zzz"), None);
    }

    #[test]
    fn test_repeated_views_hit_cache() {
        let s = session();
        s.scored();
        s.scored();
        assert_eq!(s.cache_stats().hits, 1);
    }

    #[test]
    fn test_empty_session() {
        let s = AnalysisSession::new(Vec::new());
        assert!(s.departments().is_empty());
        assert_eq!(s.selected_department(), None);
        assert!(s.scored().is_empty());
        assert!(s.redundancy().is_empty());
        assert!(s.value_report().distribution.is_empty());
    }
}

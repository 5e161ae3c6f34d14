//! Metrics Browser
//!
//! Filterable tabular view over the raw records: department, metric name
//! search, and exact matches on the three Yes/No columns.

use crate::model::MetricRecord;
use crate::scoring::ValueCategory;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MetricFilter {
    /// Exact department match; empty means all departments
    pub department: Option<String>,
    /// Case-insensitive substring of the metric name
    pub search: Option<String>,
    pub visible: Option<String>,
    pub used: Option<String>,
    pub requested: Option<String>,
}

impl MetricFilter {
    pub fn for_department(department: impl Into<String>) -> Self {
        Self {
            department: Some(department.into()),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_visible(mut self, value: impl Into<String>) -> Self {
        self.visible = Some(value.into());
        self
    }

    pub fn with_used(mut self, value: impl Into<String>) -> Self {
        self.used = Some(value.into());
        self
    }

    pub fn with_requested(mut self, value: impl Into<String>) -> Self {
        self.requested = Some(value.into());
        self
    }

    pub fn matches(&self, record: &MetricRecord) -> bool {
        if let Some(department) = self.department.as_deref().filter(|d| !d.is_empty()) {
            if record.department != department {
                return false;
            }
        }

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            if !record.metric_name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }

        let exact = |wanted: &Option<String>, actual: &str| wanted.as_deref().map_or(true, |w| w == actual);

        exact(&self.visible, &record.visible_in_dashboard)
            && exact(&self.used, &record.used_in_decision_making)
            && exact(&self.requested, &record.executive_requested)
    }
}

/// One browser row: the record plus its status badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowserRow {
    #[serde(flatten)]
    pub record: MetricRecord,
    pub status: ValueCategory,
}

pub fn browse(records: &[MetricRecord], filter: &MetricFilter) -> Vec<BrowserRow> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .map(|r| BrowserRow {
            status: ValueCategory::classify(r.used(), r.requested()),
            record: r.clone(),
        })
        .collect()
}

/// Unique departments in order of first appearance.
pub fn departments(records: &[MetricRecord]) -> Vec<String> {
    let mut seen = Vec::new();
    for record in records {
        if !seen.contains(&record.department) {
            seen.push(record.department.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(department: &str, name: &str, visible: &str, used: &str, requested: &str) -> MetricRecord {
        MetricRecord {
            department: department.to_string(),
            metric_name: name.to_string(),
            visible_in_dashboard: visible.to_string(),
            used_in_decision_making: used.to_string(),
            executive_requested: requested.to_string(),
            ..MetricRecord::default()
        }
    }

    fn sample() -> Vec<MetricRecord> {
        vec![
            record("Sales", "Monthly Revenue", "Yes", "Yes", "Yes"),
            record("Marketing", "Revenue Growth", "Yes", "No", "Yes"),
            record("Sales", "Call Volume", "No", "No", "No"),
            record("Support", "Ticket Backlog", "Yes", "Yes", "No"),
        ]
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let rows = browse(&sample(), &MetricFilter::default());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].status, ValueCategory::HighValue);
        assert_eq!(rows[1].status, ValueCategory::PotentialVanity);
        assert_eq!(rows[2].status, ValueCategory::LowPriority);
        assert_eq!(rows[3].status, ValueCategory::TeamValue);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let rows = browse(&sample(), &MetricFilter::default().with_search("REVENUE"));
        let names: Vec<&str> = rows.iter().map(|r| r.record.metric_name.as_str()).collect();
        assert_eq!(names, vec!["Monthly Revenue", "Revenue Growth"]);
    }

    #[test]
    fn test_combined_filters() {
        let filter = MetricFilter::for_department("Sales").with_used("Yes").with_visible("Yes");
        let rows = browse(&sample(), &filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record.metric_name, "Monthly Revenue");

        let none = MetricFilter::for_department("Sales").with_requested("Maybe");
        assert!(browse(&sample(), &none).is_empty());

        let everyone = MetricFilter::for_department("");
        assert_eq!(browse(&sample(), &everyone).len(), 4);
    }

    #[test]
    fn test_departments_first_appearance_order() {
        assert_eq!(departments(&sample()), vec!["Sales", "Marketing", "Support"]);
        assert!(departments(&[]).is_empty());
    }
}

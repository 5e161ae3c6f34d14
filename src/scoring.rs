//! Value Scoring
//!
//! Classifies each metric as valuable or vanity using an additive point system
//! over its decision usage, executive demand, dashboard visibility and recency.
//! Scores are heuristics, not a validated model.

use crate::model::{Answer, MetricRecord};
use serde::Serialize;
use std::fmt;

/// Number of metrics surfaced as "top" in a value report.
pub const TOP_METRICS: usize = 3;

/// Number of metric names listed per category before summarizing the rest.
pub const HIGHLIGHTS_PER_CATEGORY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueCategory {
    #[serde(rename = "High Value")]
    HighValue,
    #[serde(rename = "Potential Vanity")]
    PotentialVanity,
    #[serde(rename = "Team Value")]
    TeamValue,
    #[serde(rename = "Low Priority")]
    LowPriority,
}

impl ValueCategory {
    pub const ALL: [ValueCategory; 4] = [
        ValueCategory::HighValue,
        ValueCategory::PotentialVanity,
        ValueCategory::TeamValue,
        ValueCategory::LowPriority,
    ];

    /// Category is decided by decision usage and executive demand only.
    pub fn classify(used: Answer, requested: Answer) -> Self {
        match (used, requested) {
            (Answer::Yes, Answer::Yes) => ValueCategory::HighValue,
            (Answer::No, Answer::Yes) => ValueCategory::PotentialVanity,
            (Answer::Yes, Answer::No) => ValueCategory::TeamValue,
            _ => ValueCategory::LowPriority,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ValueCategory::HighValue => "High Value",
            ValueCategory::PotentialVanity => "Potential Vanity",
            ValueCategory::TeamValue => "Team Value",
            ValueCategory::LowPriority => "Low Priority",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ValueCategory::HighValue => "Used for decision making and requested by executives",
            ValueCategory::PotentialVanity => "Requested by executives but not used for decision making",
            ValueCategory::TeamValue => "Used for decision making but not requested by executives",
            ValueCategory::LowPriority => "Neither used for decision making nor requested by executives",
        }
    }

    pub fn impact(self) -> &'static str {
        match self {
            ValueCategory::HighValue => "Focusing on this metric will align team actions with executive priorities, creating organizational coherence and driving strategic outcomes.",
            ValueCategory::PotentialVanity => "Finding ways to incorporate this metric into decision processes could better align with executive priorities and demonstrate value to leadership.",
            ValueCategory::TeamValue => "Highlighting this metric to leadership could bridge the gap between executive vision and team execution, potentially revealing valuable operational insights.",
            ValueCategory::LowPriority => "Consider whether this metric should be maintained or if resources could be better allocated elsewhere.",
        }
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A metric record with its value score and explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMetric {
    #[serde(flatten)]
    pub record: MetricRecord,

    #[serde(rename = "valueScore")]
    pub value_score: u32,

    pub category: ValueCategory,
    pub justification: String,
    pub impact: String,
}

impl ScoredMetric {
    pub fn from_record(record: &MetricRecord) -> Self {
        let category = ValueCategory::classify(record.used(), record.requested());

        Self {
            value_score: value_score(record),
            category,
            justification: justification(record),
            impact: category.impact().to_string(),
            record: record.clone(),
        }
    }
}

/// Score, classify and rank the records of one department (or all of them).
///
/// An absent or empty filter keeps every record. Ties keep input order.
pub fn score(records: &[MetricRecord], department_filter: Option<&str>) -> Vec<ScoredMetric> {
    let department = department_filter.filter(|d| !d.is_empty());

    let mut scored: Vec<ScoredMetric> = records
        .iter()
        .filter(|r| department.map_or(true, |d| r.department == d))
        .map(ScoredMetric::from_record)
        .collect();

    // Vec::sort_by is stable
    scored.sort_by(|a, b| b.value_score.cmp(&a.value_score));
    scored
}

/// Additive value score in `0..=100`.
pub fn value_score(record: &MetricRecord) -> u32 {
    let mut points = 0;

    // Core value factors
    if record.used().is_yes() {
        points += 40;
    }
    if record.requested().is_yes() {
        points += 20;
    }
    if record.visible().is_yes() {
        points += 10;
    }

    points += match record.last_reviewed.as_str() {
        "Last month" => 15,
        "Last quarter" => 10,
        "Last year" => 5,
        _ => 0,
    };

    points += match record.metric_last_used_for_decision.as_str() {
        "Last week" => 15,
        "Last month" => 10,
        "Last quarter" => 5,
        _ => 0,
    };

    points
}

/// Justification text for a record. Never empty.
pub fn justification(record: &MetricRecord) -> String {
    let mut text = match (record.used(), record.requested()) {
        (Answer::Yes, Answer::Yes) => {
            let mut text = String::from(
                "This metric is highly valuable as it's both used for decision-making and requested by executives.",
            );
            if record.last_reviewed.contains("Last") {
                text.push_str(" It's also been recently reviewed.");
            }
            text
        }
        (Answer::Yes, _) => {
            "This metric drives team decisions but isn't explicitly requested by executives.".to_string()
        }
        (_, Answer::Yes) => {
            "This metric is requested by executives but not currently used for decision-making.".to_string()
        }
        _ => "This metric is neither used for decisions nor requested by executives.".to_string(),
    };

    if let Some(notes) = record.notes() {
        text.push_str(" Note: ");
        text.push_str(notes);
    }

    text
}

/// Leading `n` metrics of an already ranked list.
pub fn top_n(scored: &[ScoredMetric], n: usize) -> &[ScoredMetric] {
    &scored[..n.min(scored.len())]
}

/// Share of metrics falling into one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub category: ValueCategory,
    pub count: usize,
    /// Fraction of all scored metrics, 0.0 to 1.0
    pub share: f64,
}

/// Leading metric names of a category and how many were left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryHighlight {
    pub category: ValueCategory,
    pub description: &'static str,
    pub total: usize,
    pub metrics: Vec<(String, u32)>,
    pub remaining: usize,
}

/// Value vs. vanity summary for a department selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueReport {
    pub department: Option<String>,
    pub business_goal: Option<String>,
    pub top: Vec<ScoredMetric>,
    pub distribution: Vec<CategorySlice>,
    pub highlights: Vec<CategoryHighlight>,
}

impl ValueReport {
    pub fn build(scored: &[ScoredMetric], department: Option<&str>, business_goal: Option<&str>) -> Self {
        let total = scored.len();

        let distribution = ValueCategory::ALL
            .iter()
            .map(|&category| {
                let count = scored.iter().filter(|m| m.category == category).count();
                CategorySlice {
                    category,
                    count,
                    share: if total == 0 { 0.0 } else { count as f64 / total as f64 },
                }
            })
            .filter(|slice| slice.count > 0)
            .collect();

        let highlights = [
            ValueCategory::HighValue,
            ValueCategory::PotentialVanity,
            ValueCategory::TeamValue,
        ]
        .iter()
        .map(|&category| {
            let members: Vec<&ScoredMetric> = scored.iter().filter(|m| m.category == category).collect();
            let metrics = members
                .iter()
                .take(HIGHLIGHTS_PER_CATEGORY)
                .map(|m| (m.record.metric_name.clone(), m.value_score))
                .collect();

            CategoryHighlight {
                category,
                description: category.description(),
                total: members.len(),
                metrics,
                remaining: members.len().saturating_sub(HIGHLIGHTS_PER_CATEGORY),
            }
        })
        .collect();

        Self {
            department: department.filter(|d| !d.is_empty()).map(str::to_string),
            business_goal: business_goal.filter(|g| !g.trim().is_empty()).map(str::to_string),
            top: top_n(scored, TOP_METRICS).to_vec(),
            distribution,
            highlights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        department: &str,
        name: &str,
        visible: &str,
        used: &str,
        requested: &str,
        reviewed: &str,
        last_used: &str,
        notes: &str,
    ) -> MetricRecord {
        MetricRecord {
            department: department.to_string(),
            metric_name: name.to_string(),
            visible_in_dashboard: visible.to_string(),
            used_in_decision_making: used.to_string(),
            executive_requested: requested.to_string(),
            last_reviewed: reviewed.to_string(),
            metric_last_used_for_decision: last_used.to_string(),
            interpretation_notes: notes.to_string(),
        }
    }

    #[test]
    fn test_max_score_high_value() {
        let r = record("Sales", "Revenue", "Yes", "Yes", "Yes", "Last month", "Last week", "N/A");
        let scored = ScoredMetric::from_record(&r);

        assert_eq!(scored.value_score, 100);
        assert_eq!(scored.category, ValueCategory::HighValue);
        assert_eq!(
            scored.justification,
            "This metric is highly valuable as it's both used for decision-making and requested by executives. It's also been recently reviewed."
        );
        assert_eq!(scored.impact, ValueCategory::HighValue.impact());
    }

    #[test]
    fn test_recency_tiers_are_exclusive() {
        let quarter = record("A", "m", "No", "No", "No", "Last quarter", "Last month", "N/A");
        assert_eq!(value_score(&quarter), 10 + 10);

        let year = record("A", "m", "No", "No", "No", "Last year", "Last quarter", "N/A");
        assert_eq!(value_score(&year), 5 + 5);

        let never = record("A", "m", "No", "No", "No", "Never", "Last year", "N/A");
        assert_eq!(value_score(&never), 0);
    }

    #[test]
    fn test_category_partition() {
        let cases = [
            ("Yes", "Yes", ValueCategory::HighValue),
            ("No", "Yes", ValueCategory::PotentialVanity),
            ("Yes", "No", ValueCategory::TeamValue),
            ("No", "No", ValueCategory::LowPriority),
            ("Maybe", "Yes", ValueCategory::LowPriority),
            ("Yes", "", ValueCategory::LowPriority),
        ];

        for (used, requested, expected) in cases {
            let r = record("A", "m", "No", used, requested, "", "", "N/A");
            assert_eq!(ScoredMetric::from_record(&r).category, expected, "{}/{}", used, requested);
        }
    }

    #[test]
    fn test_justification_branches_and_notes() {
        let team = record("A", "m", "No", "Yes", "No", "Last year", "", "Tracked weekly");
        assert_eq!(
            justification(&team),
            "This metric drives team decisions but isn't explicitly requested by executives. Note: Tracked weekly"
        );

        let vanity = record("A", "m", "Yes", "No", "Yes", "Last month", "", "N/A");
        assert_eq!(
            justification(&vanity),
            "This metric is requested by executives but not currently used for decision-making."
        );

        let low = record("A", "m", "No", "No", "No", "", "", "");
        assert_eq!(
            justification(&low),
            "This metric is neither used for decisions nor requested by executives."
        );

        let stale = record("A", "m", "No", "Yes", "Yes", "Q1, 2024", "", "N/A");
        assert!(!justification(&stale).contains("recently reviewed"));
    }

    #[test]
    fn test_score_filters_and_ranks_stably() {
        let records = vec![
            record("Sales", "a", "No", "No", "No", "", "", "N/A"),
            record("Ops", "b", "Yes", "Yes", "Yes", "Last month", "Last week", "N/A"),
            record("Sales", "c", "No", "No", "No", "", "", "N/A"),
            record("Sales", "d", "No", "Yes", "No", "", "", "N/A"),
        ];

        let sales = score(&records, Some("Sales"));
        let names: Vec<&str> = sales.iter().map(|m| m.record.metric_name.as_str()).collect();
        assert_eq!(names, vec!["d", "a", "c"]);

        let all = score(&records, Some(""));
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].record.metric_name, "b");
        assert_eq!(score(&records, None), all);

        assert!(score(&records, Some("sales")).is_empty());
    }

    #[test]
    fn test_score_is_idempotent() {
        let records = vec![
            record("Sales", "a", "Yes", "No", "Yes", "Last year", "Last month", "x"),
            record("Sales", "b", "Yes", "No", "Yes", "Last year", "Last month", "y"),
        ];
        assert_eq!(score(&records, Some("Sales")), score(&records, Some("Sales")));
    }

    #[test]
    fn test_value_report() {
        let records = vec![
            record("Sales", "a", "Yes", "Yes", "Yes", "Last month", "Last week", "N/A"),
            record("Sales", "b", "Yes", "No", "Yes", "Last month", "", "N/A"),
            record("Sales", "c", "No", "No", "Yes", "", "", "N/A"),
            record("Sales", "d", "No", "No", "Yes", "", "", "N/A"),
            record("Sales", "e", "No", "No", "Yes", "", "", "N/A"),
            record("Sales", "f", "No", "No", "Yes", "", "", "N/A"),
        ];
        let scored = score(&records, Some("Sales"));
        let report = ValueReport::build(&scored, Some("Sales"), Some("  "));

        assert_eq!(report.department.as_deref(), Some("Sales"));
        assert_eq!(report.business_goal, None);
        assert_eq!(report.top.len(), 3);
        assert_eq!(report.top[0].record.metric_name, "a");

        assert_eq!(report.distribution.len(), 2);
        assert_eq!(report.distribution[0].category, ValueCategory::HighValue);
        assert_eq!(report.distribution[1].count, 5);

        let vanity = &report.highlights[1];
        assert_eq!(vanity.category, ValueCategory::PotentialVanity);
        assert_eq!(vanity.total, 5);
        assert_eq!(vanity.metrics.len(), 3);
        assert_eq!(vanity.remaining, 2);
    }

    #[test]
    fn test_top_n_shorter_than_n() {
        let records = vec![record("Sales", "a", "No", "No", "No", "", "", "N/A")];
        let scored = score(&records, None);
        assert_eq!(top_n(&scored, 3).len(), 1);
        assert!(top_n(&[], 3).is_empty());
    }
}

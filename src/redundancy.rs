//! Redundancy Analysis
//!
//! Finds metrics tracked under the same name in more than one row (in practice,
//! more than one department), measures how many of those trackers actually use
//! the metric for decisions, and turns that into per-department advice.

use crate::model::MetricRecord;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;

/// Groups above this many departments are flagged as highly redundant.
pub const HIGH_REDUNDANCY_THRESHOLD: usize = 3;

/// Efficiency below this suggests consolidating the metric.
pub const EFFICIENCY_THRESHOLD: f64 = 0.5;

/// A metric name shared by two or more records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedundancyGroup {
    pub metric_name: String,
    /// Member departments in input order, duplicates kept
    pub departments: Vec<String>,
    pub members: Vec<MetricRecord>,
    pub visible_count: usize,
    pub used_count: usize,
    pub requested_count: usize,
    /// Number of members
    pub redundancy_score: usize,
    /// `used_count / redundancy_score`, always within 0.0..=1.0
    pub efficiency_score: f64,
}

impl RedundancyGroup {
    /// Build a group from its members. Callers guarantee at least two.
    fn from_members(metric_name: String, members: Vec<MetricRecord>) -> Self {
        let departments: Vec<String> = members.iter().map(|m| m.department.clone()).collect();
        let visible_count = members.iter().filter(|m| m.visible().is_yes()).count();
        let used_count = members.iter().filter(|m| m.used().is_yes()).count();
        let requested_count = members.iter().filter(|m| m.requested().is_yes()).count();
        let redundancy_score = departments.len();

        Self {
            metric_name,
            departments,
            members,
            visible_count,
            used_count,
            requested_count,
            redundancy_score,
            efficiency_score: used_count as f64 / redundancy_score as f64,
        }
    }

    pub fn includes_department(&self, department: &str) -> bool {
        self.departments.iter().any(|d| d == department)
    }

    pub fn is_high_redundancy(&self) -> bool {
        self.redundancy_score > HIGH_REDUNDANCY_THRESHOLD
    }

    pub fn verdict(&self) -> RedundancyVerdict {
        if self.efficiency_score < EFFICIENCY_THRESHOLD {
            RedundancyVerdict::ConsolidateTracking
        } else {
            RedundancyVerdict::StandardizeAcrossDepartments
        }
    }
}

/// Table-level advice for a redundancy group as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RedundancyVerdict {
    ConsolidateTracking,
    StandardizeAcrossDepartments,
}

impl RedundancyVerdict {
    pub fn message(self) -> &'static str {
        match self {
            RedundancyVerdict::ConsolidateTracking => "Potential redundancy - consolidate tracking",
            RedundancyVerdict::StandardizeAcrossDepartments => "Valuable across departments - standardize",
        }
    }
}

/// Group the full record set by metric name and keep the shared names.
///
/// Groups appear in order of first appearance, then are stably sorted by
/// redundancy score, highest first.
pub fn analyze(records: &[MetricRecord]) -> Vec<RedundancyGroup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<MetricRecord>)> = Vec::new();

    for record in records {
        let slot = *index.entry(record.metric_name.as_str()).or_insert_with(|| {
            buckets.push((record.metric_name.clone(), Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(record.clone());
    }

    let mut groups: Vec<RedundancyGroup> = buckets
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(name, members)| RedundancyGroup::from_members(name, members))
        .collect();

    groups.sort_by(|a, b| b.redundancy_score.cmp(&a.redundancy_score));
    groups
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    /// Department is the only decision user
    Share,
    /// Other departments use it, this one does not
    Learn,
    /// Everyone involved uses it
    Standardize,
    /// Nobody uses it
    Consolidate,
}

impl RecommendationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationKind::Share => "share",
            RecommendationKind::Learn => "learn",
            RecommendationKind::Standardize => "standardize",
            RecommendationKind::Consolidate => "consolidate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub metric_name: String,
    #[serde(rename = "recommendationText")]
    pub recommendation: String,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
}

/// Department-specific advice for every group the department takes part in.
pub fn recommend(groups: &[RedundancyGroup], department: &str) -> Vec<Recommendation> {
    if department.is_empty() {
        return Vec::new();
    }

    groups
        .iter()
        .filter_map(|group| recommend_for_group(group, department))
        .collect()
}

fn recommend_for_group(group: &RedundancyGroup, department: &str) -> Option<Recommendation> {
    let own = group.members.iter().find(|m| m.department == department)?;
    let others: Vec<&MetricRecord> = group
        .members
        .iter()
        .filter(|m| m.department != department)
        .collect();

    let used_here = own.used().is_yes();
    let used_elsewhere = others.iter().any(|m| m.used().is_yes());
    let name = &group.metric_name;

    let (kind, recommendation) = match (used_here, used_elsewhere) {
        (true, false) => (
            RecommendationKind::Share,
            format!(
                "Your department is the only one using \"{}\" for decision making. Consider sharing your insights with {}.",
                name,
                others.iter().map(|m| m.department.as_str()).join(", ")
            ),
        ),
        (false, true) => (
            RecommendationKind::Learn,
            format!(
                "\"{}\" is used for decision making in {} but not in your department. Consider learning how they use this metric.",
                name,
                others
                    .iter()
                    .filter(|m| m.used().is_yes())
                    .map(|m| m.department.as_str())
                    .join(", ")
            ),
        ),
        (true, true) => (
            RecommendationKind::Standardize,
            format!(
                "\"{}\" is used for decision making across multiple departments including yours. Consider establishing a cross-department standard for this metric.",
                name
            ),
        ),
        (false, false) => (
            RecommendationKind::Consolidate,
            format!(
                "\"{}\" is tracked across multiple departments including yours, but isn't used for decision making. Consider if this is a vanity metric that could be consolidated or removed.",
                name
            ),
        ),
    };

    Some(Recommendation {
        metric_name: name.clone(),
        recommendation,
        kind,
    })
}

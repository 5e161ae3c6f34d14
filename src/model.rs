//! Metric Records
//!
//! One `MetricRecord` per metric-per-department row of the source dataset.
//! Every field is kept as the raw string from the CSV; `Answer` is the typed
//! view used by the scoring and redundancy decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel used by the dataset for "no interpretation notes".
pub const NOTES_ABSENT: &str = "N/A";

/// A single row of the metrics dataset.
///
/// Serde names match the CSV header exactly. Columns missing from the header
/// deserialize to empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MetricRecord {
    #[serde(rename = "Department", default)]
    pub department: String,

    #[serde(rename = "Metric_Name", default)]
    pub metric_name: String,

    #[serde(rename = "Visible_in_Dashboard", default)]
    pub visible_in_dashboard: String,

    #[serde(rename = "Used_in_Decision_Making", default)]
    pub used_in_decision_making: String,

    #[serde(rename = "Executive_Requested", default)]
    pub executive_requested: String,

    /// "Last month", "Last quarter", "Last year" or anything else
    #[serde(rename = "Last_Reviewed", default)]
    pub last_reviewed: String,

    /// "Last week", "Last month", "Last quarter" or anything else
    #[serde(rename = "Metric_Last_Used_For_Decision", default)]
    pub metric_last_used_for_decision: String,

    #[serde(rename = "Interpretation_Notes", default)]
    pub interpretation_notes: String,
}

impl MetricRecord {
    pub fn visible(&self) -> Answer {
        Answer::parse(&self.visible_in_dashboard)
    }

    pub fn used(&self) -> Answer {
        Answer::parse(&self.used_in_decision_making)
    }

    pub fn requested(&self) -> Answer {
        Answer::parse(&self.executive_requested)
    }

    /// Notes text, or `None` when empty or the `N/A` sentinel.
    pub fn notes(&self) -> Option<&str> {
        match self.interpretation_notes.as_str() {
            "" | NOTES_ABSENT => None,
            notes => Some(notes),
        }
    }
}

/// Typed view of a Yes/No column.
///
/// Parsing is exact and case-sensitive; anything other than `Yes` or `No`
/// is `Other` and never counts as either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    Yes,
    No,
    Other,
}

impl Answer {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Yes" => Answer::Yes,
            "No" => Answer::No,
            _ => Answer::Other,
        }
    }

    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Yes => write!(f, "Yes"),
            Answer::No => write!(f, "No"),
            Answer::Other => write!(f, "Other"),
        }
    }
}

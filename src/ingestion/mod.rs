//! Ingestion Module
//!
//! Fetches the dataset once from a `MetricSource` and parses it into
//! `MetricRecord`s. Fetch failures never escape this module: they are logged
//! and reported as `LoadOutcome::FetchFailed`, which callers usually collapse
//! into an empty record set.

pub mod csv_parser;
pub mod source;

pub use csv_parser::{parse, parse_with_report, split_row, DroppedRow, ParseReport};
pub use source::{source_for, FileSource, HttpSource, MetricSource, StaticSource, DEFAULT_SOURCE_URL};

use crate::model::MetricRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// Result of a single load attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// At least one record was parsed
    Loaded {
        source: String,
        loaded_at: DateTime<Utc>,
        report: ParseReport,
    },

    /// Fetch succeeded but produced no records
    Empty {
        source: String,
        dropped_rows: usize,
    },

    /// Transport failure; nothing was parsed
    FetchFailed {
        source: String,
        reason: String,
    },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }

    /// Records of a successful load, or nothing for every other outcome.
    pub fn into_records(self) -> Vec<MetricRecord> {
        match self {
            LoadOutcome::Loaded { report, .. } => report.records,
            LoadOutcome::Empty { .. } | LoadOutcome::FetchFailed { .. } => Vec::new(),
        }
    }

    pub fn source(&self) -> &str {
        match self {
            LoadOutcome::Loaded { source, .. }
            | LoadOutcome::Empty { source, .. }
            | LoadOutcome::FetchFailed { source, .. } => source,
        }
    }
}

/// Fetch and parse the dataset.
pub async fn load(source: &dyn MetricSource) -> LoadOutcome {
    let location = source.describe();
    info!("Fetching metrics dataset from {}", location);

    let text = match source.fetch_text().await {
        Ok(text) => text,
        Err(e) => {
            warn!("Error fetching metrics data from {}: {}", location, e);
            return LoadOutcome::FetchFailed {
                source: location,
                reason: e.to_string(),
            };
        }
    };

    let report = parse_with_report(&text);
    if report.dropped_count() > 0 {
        warn!(
            "Dropped {} malformed row(s) from {}",
            report.dropped_count(),
            location
        );
    }

    if report.records.is_empty() {
        info!("No metric records found in {}", location);
        return LoadOutcome::Empty {
            source: location,
            dropped_rows: report.dropped_count(),
        };
    }

    info!("Loaded {} metric records from {}", report.records.len(), location);
    LoadOutcome::Loaded {
        source: location,
        loaded_at: Utc::now(),
        report,
    }
}

//! CSV Parser - Turns raw dataset text into `MetricRecord`s
//!
//! The dataset format is deliberately simple: one header line, comma-separated
//! fields, and double quotes that toggle a "quoted" state so commas can appear
//! inside a field. There is no `""` escaping; a doubled quote toggles twice and
//! contributes nothing to the field. Rows whose field count does not match the
//! header are dropped, not treated as errors.

use crate::model::MetricRecord;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// A data row that was skipped because its field count did not match the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedRow {
    /// 1-based line number in the raw text (the header is line 1)
    pub line_number: usize,
    pub expected_fields: usize,
    pub found_fields: usize,
}

/// Records parsed from one text payload, plus what was left behind.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseReport {
    pub records: Vec<MetricRecord>,
    pub dropped_rows: Vec<DroppedRow>,
    pub blank_lines: usize,
}

impl ParseReport {
    pub fn dropped_count(&self) -> usize {
        self.dropped_rows.len()
    }
}

/// Parse dataset text, discarding diagnostics.
pub fn parse(raw_text: &str) -> Vec<MetricRecord> {
    parse_with_report(raw_text).records
}

/// Parse dataset text and keep track of dropped and blank rows.
pub fn parse_with_report(raw_text: &str) -> ParseReport {
    let mut lines = raw_text.split('\n');
    let mut report = ParseReport::default();

    let headers: Vec<String> = match lines.next() {
        Some(header_line) => header_line.split(',').map(|h| h.trim().to_string()).collect(),
        None => return report,
    };

    for (idx, line) in lines.enumerate() {
        // header occupies line 1
        let line_number = idx + 2;

        if line.trim().is_empty() {
            report.blank_lines += 1;
            continue;
        }

        let values = split_row(line);
        if values.len() != headers.len() {
            debug!(
                "Dropping line {}: expected {} fields, found {}",
                line_number,
                headers.len(),
                values.len()
            );
            report.dropped_rows.push(DroppedRow {
                line_number,
                expected_fields: headers.len(),
                found_fields: values.len(),
            });
            continue;
        }

        let mut obj = Map::new();
        for (header, value) in headers.iter().zip(values.iter()) {
            obj.insert(header.clone(), Value::String(value.trim().to_string()));
        }

        match serde_json::from_value::<MetricRecord>(Value::Object(obj)) {
            Ok(record) => report.records.push(record),
            Err(e) => {
                debug!("Dropping line {}: {}", line_number, e);
                report.dropped_rows.push(DroppedRow {
                    line_number,
                    expected_fields: headers.len(),
                    found_fields: values.len(),
                });
            }
        }
    }

    report
}

/// Split a single row on commas that are outside double quotes.
///
/// Quote characters are consumed, never emitted. Values are returned untrimmed.
pub fn split_row(row: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in row.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    fields.push(current);
    fields
}

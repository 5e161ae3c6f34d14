//! Rendering of analysis views as plain text, JSON, or CSV.

use crate::browser::BrowserRow;
use crate::error::Result;
use crate::redundancy::{Recommendation, RedundancyGroup};
use crate::scoring::{ScoredMetric, ValueReport};
use itertools::Itertools;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(out, value)?;
    Ok(())
}

pub fn write_browser_csv<W: Write>(out: W, rows: &[BrowserRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "Department",
        "Metric_Name",
        "Visible_in_Dashboard",
        "Used_in_Decision_Making",
        "Executive_Requested",
        "Last_Reviewed",
        "Status",
    ])?;

    for row in rows {
        let r = &row.record;
        wtr.write_record([
            r.department.as_str(),
            r.metric_name.as_str(),
            r.visible_in_dashboard.as_str(),
            r.used_in_decision_making.as_str(),
            r.executive_requested.as_str(),
            r.last_reviewed.as_str(),
            row.status.label(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_scored_csv<W: Write>(out: W, scored: &[ScoredMetric]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "Department",
        "Metric_Name",
        "Value_Score",
        "Category",
        "Justification",
        "Impact",
    ])?;

    for metric in scored {
        let score = metric.value_score.to_string();
        wtr.write_record([
            metric.record.department.as_str(),
            metric.record.metric_name.as_str(),
            score.as_str(),
            metric.category.label(),
            metric.justification.as_str(),
            metric.impact.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_redundancy_csv<W: Write>(out: W, groups: &[RedundancyGroup]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "Metric_Name",
        "Departments",
        "Redundancy_Score",
        "Efficiency_Score",
        "Visible_Count",
        "Used_Count",
        "Requested_Count",
        "Recommendation",
    ])?;

    for group in groups {
        wtr.write_record([
            group.metric_name.clone(),
            group.departments.join("; "),
            group.redundancy_score.to_string(),
            format!("{:.2}", group.efficiency_score),
            group.visible_count.to_string(),
            group.used_count.to_string(),
            group.requested_count.to_string(),
            group.verdict().message().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn browser_text(rows: &[BrowserRow]) -> String {
    if rows.is_empty() {
        return "No metrics found matching the current filters.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<28} {:<16} {:<8} {:<8} {:<10} {:<14} {}",
        "Metric", "Department", "Visible", "Used", "Requested", "Last Reviewed", "Status"
    );
    for row in rows {
        let r = &row.record;
        let _ = writeln!(
            out,
            "{:<28} {:<16} {:<8} {:<8} {:<10} {:<14} {}",
            r.metric_name,
            r.department,
            r.visible_in_dashboard,
            r.used_in_decision_making,
            r.executive_requested,
            r.last_reviewed,
            row.status
        );
    }
    out
}

pub fn value_report_text(report: &ValueReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Metric Value Distribution");
    for slice in &report.distribution {
        let _ = writeln!(
            out,
            "  {:<18} {:>3} ({:.0}%)",
            slice.category.label(),
            slice.count,
            slice.share * 100.0
        );
    }

    let _ = writeln!(out, "\nMetric Categories");
    for highlight in &report.highlights {
        let _ = writeln!(out, "  {} Metrics ({})", highlight.category, highlight.total);
        let _ = writeln!(out, "    {}", highlight.description);
        for (name, score) in &highlight.metrics {
            let _ = writeln!(out, "    - {} (Score: {})", name, score);
        }
        if highlight.remaining > 0 {
            let _ = writeln!(out, "    - +{} more", highlight.remaining);
        }
    }

    if let Some(department) = &report.department {
        let _ = writeln!(out, "\nTop {} Metrics by Value Score for {}", report.top.len(), department);
        if let Some(goal) = &report.business_goal {
            let _ = writeln!(out, "Based on your business goal: {}", goal);
        }

        if report.top.is_empty() {
            let _ = writeln!(
                out,
                "No metrics found for this department. Please select a department with metrics data."
            );
        }

        for (rank, metric) in report.top.iter().enumerate() {
            let _ = writeln!(
                out,
                "\n{}. {} [{}] Value Score: {}",
                rank + 1,
                metric.record.metric_name,
                metric.category,
                metric.value_score
            );
            let _ = writeln!(out, "   Justification: {}", metric.justification);
            let _ = writeln!(out, "   Impact: {}", metric.impact);
            let _ = writeln!(
                out,
                "   Dashboard: {} | Decision Making: {} | Executive Requested: {} | Last Reviewed: {}",
                metric.record.visible_in_dashboard,
                metric.record.used_in_decision_making,
                metric.record.executive_requested,
                metric.record.last_reviewed
            );
        }
    }

    out
}

pub fn redundancy_text(groups: &[RedundancyGroup], recommendations: &[Recommendation], department: Option<&str>) -> String {
    let mut out = String::new();

    if groups.is_empty() {
        let _ = writeln!(out, "No redundant metrics found across departments.");
    }

    for group in groups {
        let flag = if group.is_high_redundancy() { " (high)" } else { "" };
        let _ = writeln!(out, "{}", group.metric_name);
        let _ = writeln!(out, "  Departments:        {}", group.departments.iter().join(", "));
        let _ = writeln!(out, "  Redundancy Score:   {}{}", group.redundancy_score, flag);
        let _ = writeln!(out, "  Efficiency Score:   {:.0}%", group.efficiency_score * 100.0);
        let _ = writeln!(out, "  Dashboard Visible:  {}/{}", group.visible_count, group.redundancy_score);
        let _ = writeln!(out, "  Decision Usage:     {}/{}", group.used_count, group.redundancy_score);
        let _ = writeln!(out, "  Recommendation:     {}", group.verdict().message());
    }

    if let Some(department) = department {
        if !recommendations.is_empty() {
            let _ = writeln!(out, "\nRecommendations for {}", department);
            for rec in recommendations {
                let _ = writeln!(out, "  [{}] {}", rec.kind.as_str(), rec.recommendation);
            }
        }
    }

    out
}

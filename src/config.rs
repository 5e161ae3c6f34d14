//! Configuration
//!
//! The only real setting is where the dataset lives. Department and business
//! goal may be preset from the environment so the binary can run unattended.
//!
//! Environment variables (a `.env` file is honored by the binary):
//! - `METRICS_SOURCE`: URL or local file path of the dataset CSV
//! - `METRICS_DEPARTMENT`: initial department selection
//! - `METRICS_BUSINESS_GOAL`: business goal echoed in the value report

use crate::error::{AuditError, Result};
use crate::ingestion::DEFAULT_SOURCE_URL;

pub const SOURCE_VAR: &str = "METRICS_SOURCE";
pub const DEPARTMENT_VAR: &str = "METRICS_DEPARTMENT";
pub const BUSINESS_GOAL_VAR: &str = "METRICS_BUSINESS_GOAL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    pub source: String,
    pub department: Option<String>,
    pub business_goal: Option<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE_URL.to_string(),
            department: None,
            business_goal: None,
        }
    }
}

impl AuditConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            source: get(SOURCE_VAR).unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            department: get(DEPARTMENT_VAR),
            business_goal: get(BUSINESS_GOAL_VAR),
        }
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        source: Option<String>,
        department: Option<String>,
        business_goal: Option<String>,
    ) -> Self {
        if let Some(source) = source {
            self.source = source;
        }
        if department.is_some() {
            self.department = department;
        }
        if business_goal.is_some() {
            self.business_goal = business_goal;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(AuditError::Config("dataset source must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_to_public_dataset() {
        let config = AuditConfig::from_lookup(|_| None);
        assert_eq!(config, AuditConfig::default());
        assert_eq!(config.source, DEFAULT_SOURCE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reads_variables_and_ignores_blank_values() {
        let env: HashMap<&str, &str> = [
            (SOURCE_VAR, "data/metrics.csv"),
            (DEPARTMENT_VAR, "Sales"),
            (BUSINESS_GOAL_VAR, "   "),
        ]
        .into_iter()
        .collect();

        let config = AuditConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.source, "data/metrics.csv");
        assert_eq!(config.department.as_deref(), Some("Sales"));
        assert_eq!(config.business_goal, None);
    }

    #[test]
    fn test_overrides_win() {
        let config = AuditConfig::default().with_overrides(
            Some("local.csv".to_string()),
            None,
            Some("Reduce churn".to_string()),
        );
        assert_eq!(config.source, "local.csv");
        assert_eq!(config.department, None);
        assert_eq!(config.business_goal.as_deref(), Some("Reduce churn"));
    }

    #[test]
    fn test_empty_source_is_rejected() {
        let config = AuditConfig::default().with_overrides(Some(" ".to_string()), None, None);
        assert!(matches!(config.validate(), Err(AuditError::Config(_))));
    }
}

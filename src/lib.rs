pub mod browser;
pub mod cache;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod model;
pub mod redundancy;
pub mod render;
pub mod scoring;
pub mod session;

pub use error::{AuditError, Result};
pub use model::{Answer, MetricRecord};
pub use session::AnalysisSession;

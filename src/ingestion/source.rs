//! Metric Sources - Where the raw dataset text comes from
//!
//! A source performs exactly one fetch of the whole dataset. There is no
//! pagination, retry, or timeout; failures surface as `AuditError` and are
//! degraded to an empty dataset by the loader.

use crate::error::{AuditError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Location of the public sample dataset.
pub const DEFAULT_SOURCE_URL: &str = "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/Week%202%20Problem%204%20Vanity%20Metrics%20Dashboard%20Revised-liqfhn9jgfcYEBqEzmzkaLSb8tvW1I.csv";

/// Metric Source Trait
///
/// Implementations:
/// - HttpSource: single GET against a URL
/// - FileSource: local CSV file
/// - StaticSource: text already in memory
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Fetch the full dataset text
    async fn fetch_text(&self) -> Result<String>;

    /// Human-readable location, used in logs and load outcomes
    fn describe(&self) -> String;
}

pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_URL)
    }
}

#[async_trait]
impl MetricSource for HttpSource {
    async fn fetch_text(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::Fetch(format!(
                "GET {} returned {}",
                self.url, status
            )));
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MetricSource for FileSource {
    async fn fetch_text(&self) -> Result<String> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory dataset, mostly useful for tests and embedding.
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl MetricSource for StaticSource {
    async fn fetch_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        "<in-memory>".to_string()
    }
}

/// Pick an HTTP or file source from a location string.
pub fn source_for(location: &str) -> Box<dyn MetricSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

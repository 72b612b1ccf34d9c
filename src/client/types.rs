use crate::config::{CrawlConfig, ExtractionConfig};
use crate::CrawlError;
use serde::{Deserialize, Serialize};

/// Message used when the service reports failure without saying why
pub const GENERIC_FAILURE_MESSAGE: &str = "Crawling failed";

/// Body of `POST /api/crawl`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRequest {
    pub url: String,
    pub config: CrawlConfig,
    pub extraction_config: ExtractionConfig,
}

impl CrawlRequest {
    pub fn new(url: impl Into<String>, config: CrawlConfig, extraction_config: ExtractionConfig) -> Self {
        Self {
            url: url.into(),
            config,
            extraction_config,
        }
    }
}

/// Statistics the service reports about a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlMetadata {
    /// Human-readable duration, e.g. "1.2s"
    pub crawl_time: String,
    pub word_count: u64,
    pub link_count: u64,
    pub image_count: u64,
}

/// Body of a 2xx response from `POST /api/crawl`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,

    /// Structured data; its shape is decided by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CrawlMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// URL the service actually crawled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Page title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CrawlResult {
    /// Splits a payload into a usable result or an application error
    ///
    /// A payload with `success: false` becomes [`CrawlError::Application`]
    /// carrying the payload's `error`, or a generic message when that is
    /// missing or empty.
    pub fn into_outcome(self) -> Result<CrawlResult, CrawlError> {
        if self.success {
            return Ok(self);
        }

        let message = self
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        Err(CrawlError::Application(message))
    }
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

//! Crawl Studio: an interactive client for a remote crawling service
//!
//! This crate submits a URL to a crawl service, tracks the request through a
//! small session state machine, shows a cosmetic progress indicator while the
//! request is pending, and exports the returned content.

pub mod client;
pub mod config;
pub mod export;
pub mod progress;
pub mod session;

use thiserror::Error;

/// Main error type for Crawl Studio operations
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Why a crawl attempt ended in the failed state.
///
/// The `Display` output of each variant is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrawlError {
    /// The URL was empty or whitespace; nothing was sent
    #[error("Please enter a valid URL")]
    Validation,

    /// The service answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Transport { status: u16 },

    /// The service answered 2xx but reported `success: false`
    #[error("{0}")]
    Application(String),

    /// Network failure, malformed payload, or anything else
    #[error("Failed to crawl the URL: {0}")]
    Unknown(String),
}

/// Result type alias for Crawl Studio operations
pub type Result<T> = std::result::Result<T, StudioError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{CrawlService, HttpCrawlService};
pub use config::{ConfigurationModel, CrawlConfig, ExtractionConfig, OutputFormat, Settings};
pub use export::{export, ExportArtifact, ExportFormat};
pub use session::{CrawlSession, SessionPhase, SessionState};

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Format the crawl service should render the page in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
    Html,
}

impl OutputFormat {
    /// Returns the wire representation of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            other => Err(ConfigError::Validation(format!(
                "output format must be one of markdown, json, html; got '{}'",
                other
            ))),
        }
    }
}

/// Crawl options sent with every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlConfig {
    /// Run the browser without a visible window
    pub headless: bool,

    /// Capture screenshots of the page
    pub screenshots: bool,

    /// Collect image references
    pub extract_images: bool,

    /// Collect link references
    pub extract_links: bool,

    /// Seconds the service waits for the page to settle
    pub wait_time: u32,

    pub user_agent: String,

    pub output_format: OutputFormat,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            headless: true,
            screenshots: false,
            extract_images: false,
            extract_links: true,
            wait_time: 3,
            user_agent: "default".to_string(),
            output_format: OutputFormat::Markdown,
        }
    }
}

/// Options for the optional AI-driven extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionConfig {
    #[serde(rename = "useAI")]
    pub use_ai: bool,

    /// Free-form schema describing the data to extract
    pub schema: String,

    /// Restricts extraction to the matching elements
    pub css_selector: String,

    /// Natural-language description of what to extract
    pub extraction_prompt: String,
}

/// Client settings loaded from a TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub service: ServiceConfig,
    #[serde(default)]
    pub crawl: CrawlDefaults,
    #[serde(default)]
    pub extraction: ExtractionDefaults,
    #[serde(default)]
    pub export: ExportSettings,
}

/// Where the crawl service lives
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL the `/api/...` routes are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Transport timeout in seconds; no timeout when unset
    #[serde(rename = "request-timeout-secs", default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Overrides for the default crawl options
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlDefaults {
    pub headless: Option<bool>,
    pub screenshots: Option<bool>,
    pub extract_images: Option<bool>,
    pub extract_links: Option<bool>,
    pub wait_time: Option<u32>,
    pub user_agent: Option<String>,
    pub output_format: Option<OutputFormat>,
}

/// Overrides for the default extraction options
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExtractionDefaults {
    pub use_ai: Option<bool>,
    pub schema: Option<String>,
    pub css_selector: Option<String>,
    pub extraction_prompt: Option<String>,
}

/// Export destination settings
#[derive(Debug, Clone, Deserialize)]
pub struct ExportSettings {
    /// Directory export files are written to
    #[serde(default = "default_export_directory")]
    pub directory: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
        }
    }
}

fn default_export_directory() -> String {
    ".".to_string()
}

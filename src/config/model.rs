//! Editable crawl and extraction options
//!
//! Every setter replaces exactly one field and leaves the rest untouched.

use crate::config::types::{CrawlConfig, ExtractionConfig, OutputFormat};
use crate::ConfigError;

/// The options a user edits between crawls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationModel {
    crawl: CrawlConfig,
    extraction: ExtractionConfig,
}

impl ConfigurationModel {
    /// Creates a model holding the default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn crawl(&self) -> &CrawlConfig {
        &self.crawl
    }

    pub fn extraction(&self) -> &ExtractionConfig {
        &self.extraction
    }

    /// Returns owned copies of both option sets for building a request
    pub fn snapshot(&self) -> (CrawlConfig, ExtractionConfig) {
        (self.crawl.clone(), self.extraction.clone())
    }

    pub fn set_headless(&mut self, headless: bool) {
        tracing::debug!("config: headless = {}", headless);
        self.crawl.headless = headless;
    }

    pub fn set_screenshots(&mut self, screenshots: bool) {
        tracing::debug!("config: screenshots = {}", screenshots);
        self.crawl.screenshots = screenshots;
    }

    pub fn set_extract_images(&mut self, extract_images: bool) {
        tracing::debug!("config: extractImages = {}", extract_images);
        self.crawl.extract_images = extract_images;
    }

    pub fn set_extract_links(&mut self, extract_links: bool) {
        tracing::debug!("config: extractLinks = {}", extract_links);
        self.crawl.extract_links = extract_links;
    }

    /// Parses and stores the wait time in seconds
    ///
    /// Input that is not a non-negative integer is rejected and the previous
    /// value is kept.
    pub fn set_wait_time(&mut self, input: &str) -> Result<u32, ConfigError> {
        let wait_time = input.trim().parse::<u32>().map_err(|_| {
            tracing::warn!("Rejected wait time input '{}'", input);
            ConfigError::Validation(format!(
                "wait time must be a non-negative whole number of seconds, got '{}'",
                input
            ))
        })?;

        self.set_wait_secs(wait_time);
        Ok(wait_time)
    }

    /// Stores a wait time that is already a whole number of seconds
    pub fn set_wait_secs(&mut self, wait_time: u32) {
        tracing::debug!("config: waitTime = {}", wait_time);
        self.crawl.wait_time = wait_time;
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.crawl.user_agent = user_agent.into();
        tracing::debug!("config: userAgent = {}", self.crawl.user_agent);
    }

    pub fn set_output_format(&mut self, output_format: OutputFormat) {
        tracing::debug!("config: outputFormat = {}", output_format);
        self.crawl.output_format = output_format;
    }

    pub fn set_use_ai(&mut self, use_ai: bool) {
        tracing::debug!("config: useAI = {}", use_ai);
        self.extraction.use_ai = use_ai;
    }

    pub fn set_schema(&mut self, schema: impl Into<String>) {
        self.extraction.schema = schema.into();
    }

    pub fn set_css_selector(&mut self, css_selector: impl Into<String>) {
        self.extraction.css_selector = css_selector.into();
        tracing::debug!("config: cssSelector = {}", self.extraction.css_selector);
    }

    pub fn set_extraction_prompt(&mut self, prompt: impl Into<String>) {
        self.extraction.extraction_prompt = prompt.into();
    }
}

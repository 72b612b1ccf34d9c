//! Configuration module for Crawl Studio
//!
//! This module holds the editable crawl and extraction options and loads the
//! client settings file (TOML).
//!
//! # Example
//!
//! ```no_run
//! use crawl_studio::config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("crawl-studio.toml")).unwrap();
//! let model = settings.configuration_model();
//! println!("Wait time: {}s", model.crawl().wait_time);
//! ```

mod model;
mod parser;
mod types;
mod validation;

// Re-export types
pub use model::ConfigurationModel;
pub use types::{
    CrawlConfig, CrawlDefaults, ExportSettings, ExtractionConfig, ExtractionDefaults,
    OutputFormat, ServiceConfig, Settings,
};

// Re-export parser functions
pub use parser::{load_settings, parse_settings};

use crate::config::model::ConfigurationModel;
use crate::config::types::Settings;
use crate::config::validation::validate;
use crate::ConfigResult;
use std::path::Path;

/// Loads and parses a settings file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded and validated settings
/// * `Err(ConfigError)` - Failed to load, parse, or validate the settings
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use crawl_studio::config::load_settings;
///
/// let settings = load_settings(Path::new("crawl-studio.toml")).unwrap();
/// println!("Service: {}", settings.service.base_url);
/// ```
pub fn load_settings(path: &Path) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Parses and validates settings from TOML text
pub fn parse_settings(content: &str) -> ConfigResult<Settings> {
    let settings: Settings = toml::from_str(content)?;
    validate(&settings)?;
    Ok(settings)
}

impl Settings {
    /// Builds the editable option model, applying the file's overrides on top
    /// of the defaults
    pub fn configuration_model(&self) -> ConfigurationModel {
        let mut model = ConfigurationModel::new();
        let crawl = &self.crawl;
        let extraction = &self.extraction;

        if let Some(headless) = crawl.headless {
            model.set_headless(headless);
        }
        if let Some(screenshots) = crawl.screenshots {
            model.set_screenshots(screenshots);
        }
        if let Some(extract_images) = crawl.extract_images {
            model.set_extract_images(extract_images);
        }
        if let Some(extract_links) = crawl.extract_links {
            model.set_extract_links(extract_links);
        }
        if let Some(wait_time) = crawl.wait_time {
            model.set_wait_secs(wait_time);
        }
        if let Some(user_agent) = &crawl.user_agent {
            model.set_user_agent(user_agent.clone());
        }
        if let Some(output_format) = crawl.output_format {
            model.set_output_format(output_format);
        }

        if let Some(use_ai) = extraction.use_ai {
            model.set_use_ai(use_ai);
        }
        if let Some(schema) = &extraction.schema {
            model.set_schema(schema.clone());
        }
        if let Some(css_selector) = &extraction.css_selector {
            model.set_css_selector(css_selector.clone());
        }
        if let Some(prompt) = &extraction.extraction_prompt {
            model.set_extraction_prompt(prompt.clone());
        }

        model
    }
}

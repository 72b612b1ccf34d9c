use crate::config::types::{ExportSettings, ServiceConfig, Settings};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire settings file
pub fn validate(settings: &Settings) -> ConfigResult<()> {
    validate_service_config(&settings.service)?;
    validate_export_settings(&settings.export)?;
    Ok(())
}

/// Validates the crawl service location
fn validate_service_config(config: &ServiceConfig) -> ConfigResult<()> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' cannot be used as a base",
            config.base_url
        )));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_export_settings(config: &ExportSettings) -> ConfigResult<()> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "export directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

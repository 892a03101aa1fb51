use crate::config::types::{Config, HttpConfig, OutputConfig, SelectorConfig, SourceConfig};
use crate::scrape::SelectorSet;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    validate_selector_config(&config.selectors)?;
    Ok(())
}

/// Validates the chart origin and path
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let origin = Url::parse(&config.origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin '{}': {}", config.origin, e)))?;

    if origin.scheme() != "http" && origin.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Origin '{}' must use http or https",
            config.origin
        )));
    }

    if origin.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Origin '{}' has no host",
            config.origin
        )));
    }

    if origin.path() != "/" {
        return Err(ConfigError::InvalidUrl(format!(
            "Origin '{}' must not contain a path",
            config.origin
        )));
    }

    if !config.chart_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "chart-path must start with '/', got '{}'",
            config.chart_path
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates that every selector compiles and the marker is usable
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    if config.updated_marker.is_empty() {
        return Err(ConfigError::Validation(
            "updated-marker cannot be empty".to_string(),
        ));
    }

    SelectorSet::compile(config)?;
    Ok(())
}

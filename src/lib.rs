//! Playstore top apps: a top-charts scraper
//!
//! This crate fetches a storefront's top-charts page, visits the detail page
//! of every listed app and records each app's review count and last-update
//! date in a tab-separated report.

pub mod config;
pub mod output;
pub mod scrape;

use thiserror::Error;

/// Main error type for scrape runs
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Empty detail link for app '{name}'")]
    EmptyLink { name: String },

    #[error("Detail link for app '{name}' leaves the storefront origin: {link}")]
    ForeignLink { name: String, link: String },

    #[error("Expected markup not found at {url}: {what}")]
    MarkupNotFound { url: String, what: String },

    #[error("Report error: {0}")]
    Report(#[from] output::ReportError),
}

impl ScrapeError {
    /// Returns true for failures that only concern a single app's page.
    ///
    /// Network and filesystem failures are never skippable.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            ScrapeError::MarkupNotFound { .. }
                | ScrapeError::EmptyLink { .. }
                | ScrapeError::ForeignLink { .. }
        )
    }
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

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Cannot determine home directory for the default output path")]
    MissingHome,
}

/// Result type alias for scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use output::{ReportSink, RunSummary, TsvReport};
pub use scrape::{AppDetails, ChartEntry, ChartListing, KeyMode};

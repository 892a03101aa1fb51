use crate::scrape::KeyMode;
use crate::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// File name of the report written into the home directory by default
pub const DEFAULT_REPORT_FILE_NAME: &str = "playstore-top-app-details.tsv";

/// Main configuration structure
///
/// Every section and field is optional; anything left out falls back to the
/// values the scraper was built against.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
    pub run: RunConfig,
    pub selectors: SelectorConfig,
}

/// Where the chart lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourceConfig {
    /// Storefront origin; detail links are resolved against it
    pub origin: String,

    /// Path of the top-charts page below the origin
    pub chart_path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            origin: "https://play.google.com".to_string(),
            chart_path: "/store/apps/top".to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Report path; `None` means `{home}/playstore-top-app-details.tsv`
    pub path: Option<PathBuf>,
}

impl OutputConfig {
    /// Returns the configured report path, or the default one in the
    /// user's home directory
    pub fn resolved_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => home_dir()
                .map(|home| home.join(DEFAULT_REPORT_FILE_NAME))
                .ok_or(ConfigError::MissingHome),
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// What to do when a single app's detail page cannot be scraped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailFailurePolicy {
    /// Log the failure, leave the app out of the report and carry on
    #[default]
    Skip,

    /// Stop the run; rows already written stay on disk
    Abort,
}

/// Run behavior configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RunConfig {
    pub on_detail_failure: DetailFailurePolicy,
    pub key_by: KeyMode,
}

/// CSS selectors describing the storefront markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    /// One element per app on the chart page
    pub app_card: String,

    /// Element inside a card whose `title` attribute holds the app name
    pub app_title: String,

    /// Anchor inside a card whose `href` is the detail link
    pub app_link: String,

    /// Review count on the detail page
    pub review_count: String,

    /// "Additional information" rows on the detail page
    pub info_row: String,

    /// Value label inside an info row
    pub info_value: String,

    /// Text identifying the last-updated info row
    pub updated_marker: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            app_card: "div.b8cIId.ReQCgd.Q9MA7b".to_string(),
            app_title: "div.WsMG1c.nnK0zc".to_string(),
            app_link: "a".to_string(),
            review_count: "span.AYi5wd.TBRnV span".to_string(),
            info_row: "div.hAyfc".to_string(),
            info_value: "span.htlgb span.htlgb".to_string(),
            updated_marker: "Updated".to_string(),
        }
    }
}

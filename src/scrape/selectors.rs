//! Compiled selector contract
//!
//! The storefront's markup changes over time, so the rules for finding app
//! cards, names, links, review counts and the last-updated row are plain
//! CSS selectors taken from configuration. They are compiled once here and
//! shared by every parse.

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::Selector;

/// Parsed selectors ready for matching
#[derive(Debug, Clone)]
pub struct SelectorSet {
    pub app_card: Selector,
    pub app_title: Selector,
    pub app_link: Selector,
    pub review_count: Selector,
    pub info_row: Selector,
    pub info_value: Selector,

    /// Substring that identifies the last-updated info row
    pub updated_marker: String,
}

impl SelectorSet {
    /// Compiles every selector in the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(SelectorSet)` - All selectors are valid CSS
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that failed to parse
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            app_card: compile_selector(&config.app_card)?,
            app_title: compile_selector(&config.app_title)?,
            app_link: compile_selector(&config.app_link)?,
            review_count: compile_selector(&config.review_count)?,
            info_row: compile_selector(&config.info_row)?,
            info_value: compile_selector(&config.info_value)?,
            updated_marker: config.updated_marker.clone(),
        })
    }
}

fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

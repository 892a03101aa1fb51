//! Configuration module
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every setting has a built-in default, so the scraper
//! also runs with no file at all.
//!
//! # Example
//!
//! ```no_run
//! use playstore_top_apps::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scrape.toml")).unwrap();
//! println!("Writing report to {:?}", config.output.path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DetailFailurePolicy, HttpConfig, OutputConfig, RunConfig, SelectorConfig,
    SourceConfig, DEFAULT_REPORT_FILE_NAME,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, load_or_default, parse_config,
};
pub use validation::validate;

//! Scrape module for the top chart and app detail pages
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with explicit timeouts
//! - The configurable selector contract
//! - HTML parsing of chart and detail pages
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod parser;
mod selectors;
mod storefront;
mod types;

pub use coordinator::{run_scrape, Coordinator};
pub use fetcher::{build_http_client, fetch_page};
pub use parser::{element_text, parse_app_details, parse_chart_listing};
pub use selectors::SelectorSet;
pub use storefront::Storefront;
pub use types::{AppDetails, ChartEntry, ChartListing, KeyMode};

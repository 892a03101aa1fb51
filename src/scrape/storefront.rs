//! Chart lister and detail fetcher
//!
//! [`Storefront`] binds an HTTP client, the storefront origin and the
//! compiled selector contract together. It performs one GET per call and
//! hands the body to the pure parsers.

use crate::config::Config;
use crate::scrape::fetcher::{build_http_client, fetch_page};
use crate::scrape::parser::{parse_app_details, parse_chart_listing};
use crate::scrape::selectors::SelectorSet;
use crate::scrape::types::{AppDetails, ChartListing, KeyMode};
use crate::{ConfigError, ScrapeError};
use reqwest::Client;
use url::Url;

/// A configured storefront that can list its top chart and app details
#[derive(Debug, Clone)]
pub struct Storefront {
    client: Client,
    origin: Url,
    chart_url: Url,
    selectors: SelectorSet,
}

impl Storefront {
    /// Builds a storefront from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Storefront)` - Client built and selectors compiled
    /// * `Err(ScrapeError)` - Invalid origin, selector or client settings
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.http).map_err(|e| ScrapeError::Http {
            url: config.source.origin.clone(),
            source: e,
        })?;
        let selectors = SelectorSet::compile(&config.selectors)?;
        Self::with_client(client, &config.source.origin, &config.source.chart_path, selectors)
    }

    /// Builds a storefront around an existing client
    ///
    /// The origin must be a bare scheme and host (optionally a port); a path
    /// below it would be dropped when resolving site-relative links.
    pub fn with_client(
        client: Client,
        origin: &str,
        chart_path: &str,
        selectors: SelectorSet,
    ) -> Result<Self, ScrapeError> {
        let origin = Url::parse(origin)?;
        if origin.path() != "/" {
            return Err(ConfigError::InvalidUrl(format!(
                "Origin '{}' must not contain a path",
                origin
            ))
            .into());
        }
        let chart_url = origin.join(chart_path)?;

        Ok(Self {
            client,
            origin,
            chart_url,
            selectors,
        })
    }

    /// URL of the top-charts page
    pub fn chart_url(&self) -> &Url {
        &self.chart_url
    }

    /// Resolves a site-relative detail link against the origin
    ///
    /// # Returns
    ///
    /// * `Ok(Url)` - Absolute detail URL
    /// * `Err(ScrapeError::EmptyLink)` - The link is empty or blank
    /// * `Err(ScrapeError::ForeignLink)` - The link resolves to another scheme, host or port
    /// * `Err(ScrapeError::UrlParse)` - The link cannot be joined to the origin
    pub fn detail_url(&self, name: &str, link: &str) -> Result<Url, ScrapeError> {
        let link = link.trim();
        if link.is_empty() {
            return Err(ScrapeError::EmptyLink {
                name: name.to_string(),
            });
        }

        let url = self.origin.join(link)?;
        if url.origin() != self.origin.origin() {
            return Err(ScrapeError::ForeignLink {
                name: name.to_string(),
                link: link.to_string(),
            });
        }
        Ok(url)
    }

    /// Fetches the top-charts page and returns its apps in listing order
    ///
    /// Any failure here is fatal to a run: without the listing there is
    /// nothing to scrape.
    pub async fn list_top_apps(&self, key_mode: KeyMode) -> Result<ChartListing, ScrapeError> {
        let chart_url = self.chart_url();
        tracing::info!("Fetching top charts from {}", chart_url);

        let body = fetch_page(&self.client, chart_url).await?;
        let listing = parse_chart_listing(&body, &self.selectors, key_mode, chart_url.as_str())?;

        tracing::info!("Found {} apps on the chart", listing.len());
        Ok(listing)
    }

    /// Fetches one app's detail page and scrapes its review count and
    /// last-updated text
    pub async fn fetch_details(&self, name: &str, link: &str) -> Result<AppDetails, ScrapeError> {
        let url = self.detail_url(name, link)?;
        let body = fetch_page(&self.client, &url).await?;
        parse_app_details(name, &body, &self.selectors, url.as_str())
    }
}

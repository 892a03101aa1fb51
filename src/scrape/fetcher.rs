//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by the scraper:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests for chart and detail pages
//! - Error classification (timeout, transport failure, non-2xx status)
//!
//! There is no retry: the first failure is returned to the caller.

use crate::config::HttpConfig;
use crate::ScrapeError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use playstore_top_apps::config::HttpConfig;
/// use playstore_top_apps::scrape::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body as text
///
/// Redirects are followed by the client's default policy.
///
/// # Returns
///
/// * `Ok(String)` - The response body of a 2xx response
/// * `Err(ScrapeError::HttpStatus)` - The server answered with a non-2xx status
/// * `Err(ScrapeError::Timeout)` - The request or body read timed out
/// * `Err(ScrapeError::Http)` - Any other transport failure
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, ScrapeError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| classify_error(url, e))?;
    tracing::debug!("Fetched {} ({} bytes)", url, body.len());

    Ok(body)
}

/// Maps a reqwest error onto the scrape error taxonomy
fn classify_error(url: &Url, error: reqwest::Error) -> ScrapeError {
    if error.is_timeout() {
        ScrapeError::Timeout {
            url: url.to_string(),
        }
    } else {
        ScrapeError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

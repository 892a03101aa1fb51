//! HTML parsing for chart and detail pages
//!
//! These functions only take HTML text and a compiled [`SelectorSet`]; they
//! never touch the network, so they can be exercised against saved pages.
//! The `page_url` arguments are only used to label errors.

use crate::scrape::selectors::SelectorSet;
use crate::scrape::types::{AppDetails, ChartEntry, ChartListing, KeyMode};
use crate::ScrapeError;
use scraper::{ElementRef, Html};

/// Extracts every app card from a chart page
///
/// # Extraction Rules
///
/// - Each element matching `app_card` is one app
/// - The name is the `title` attribute of the first `app_title` element in the card
/// - The link is the `href` attribute of the first `app_link` element in the card
/// - Cards missing either attribute are skipped with a warning
/// - Duplicate keys are resolved by [`ChartListing::insert`] (last write wins)
///
/// # Returns
///
/// * `Ok(ChartListing)` - At least one usable card was found
/// * `Err(ScrapeError::MarkupNotFound)` - No cards, or no card with both a name and a link
///
/// # Example
///
/// ```
/// use playstore_top_apps::config::SelectorConfig;
/// use playstore_top_apps::scrape::{parse_chart_listing, KeyMode, SelectorSet};
///
/// let html = r#"<div class="b8cIId ReQCgd Q9MA7b">
///     <a href="/store/apps/details?id=a"><div class="WsMG1c nnK0zc" title="App A"></div></a>
/// </div>"#;
/// let selectors = SelectorSet::compile(&SelectorConfig::default()).unwrap();
/// let listing = parse_chart_listing(html, &selectors, KeyMode::Name, "fixture").unwrap();
/// let entry = listing.iter().next().unwrap();
/// assert_eq!(entry.name, "App A");
/// assert_eq!(entry.link, "/store/apps/details?id=a");
/// ```
pub fn parse_chart_listing(
    html: &str,
    selectors: &SelectorSet,
    key_mode: KeyMode,
    page_url: &str,
) -> Result<ChartListing, ScrapeError> {
    let document = Html::parse_document(html);
    let mut listing = ChartListing::new(key_mode);
    let mut cards = 0usize;

    for card in document.select(&selectors.app_card) {
        cards += 1;

        let name = card
            .select(&selectors.app_title)
            .next()
            .and_then(|element| element.value().attr("title"));
        let link = card
            .select(&selectors.app_link)
            .next()
            .and_then(|element| element.value().attr("href"));

        let (Some(name), Some(link)) = (name, link) else {
            tracing::warn!("Skipping app card #{} on {}: missing title or link", cards, page_url);
            continue;
        };

        if let Some(replaced) = listing.insert(ChartEntry::new(name, link)) {
            tracing::debug!(
                "Duplicate chart entry '{}' ({}) replaced by ({})",
                replaced.name,
                replaced.link,
                link
            );
        }
    }

    if cards == 0 {
        return Err(markup_not_found(page_url, "app cards"));
    }

    if listing.is_empty() {
        return Err(markup_not_found(page_url, "app card title or link"));
    }

    Ok(listing)
}

/// Extracts review count and last-updated text from a detail page
///
/// # Extraction Rules
///
/// - Review count: text of the first `review_count` element
/// - Last updated: the first `info_row` whose text contains the updated
///   marker; its `info_value` elements' texts joined by a single space.
///   Empty texts are kept in the join, and a row without any value label
///   yields an empty string.
///
/// Element text is whitespace-collapsed and trimmed, otherwise verbatim.
///
/// # Returns
///
/// * `Ok(AppDetails)` - Both fields were found; `name` is copied unchanged
/// * `Err(ScrapeError::MarkupNotFound)` - Review count or updated row missing
pub fn parse_app_details(
    name: &str,
    html: &str,
    selectors: &SelectorSet,
    page_url: &str,
) -> Result<AppDetails, ScrapeError> {
    let document = Html::parse_document(html);

    let num_reviews = document
        .select(&selectors.review_count)
        .next()
        .map(element_text)
        .ok_or_else(|| markup_not_found(page_url, "review count"))?;

    let updated_row = document
        .select(&selectors.info_row)
        .find(|row| element_text(*row).contains(&selectors.updated_marker))
        .ok_or_else(|| markup_not_found(page_url, "updated row"))?;

    let last_updated = join_texts(updated_row.select(&selectors.info_value).map(element_text));

    Ok(AppDetails::new(name, num_reviews, last_updated))
}

/// Joins element texts with a single space, the way a selection's combined
/// text reads: a separator is only added once something has been written.
fn join_texts(texts: impl Iterator<Item = String>) -> String {
    let mut joined = String::new();
    for text in texts {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(&text);
    }
    joined
}

/// Returns the element's text with whitespace runs collapsed and trimmed
pub fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn markup_not_found(page_url: &str, what: &str) -> ScrapeError {
    ScrapeError::MarkupNotFound {
        url: page_url.to_string(),
        what: what.to_string(),
    }
}

//! Records produced by the chart and detail scrapers

use indexmap::map::IntoValues;
use indexmap::IndexMap;
use serde::Deserialize;

/// One app as it appears on the chart page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    /// Human-readable app name
    pub name: String,

    /// Site-relative link to the app's detail page
    pub link: String,
}

impl ChartEntry {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }
}

/// How chart entries are deduplicated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    /// One entry per app name; a later card with the same name replaces the
    /// earlier card's link
    #[default]
    Name,

    /// One entry per detail link, so same-titled apps are all kept
    Link,
}

/// Ordered, deduplicated chart entries
///
/// Entries keep the position at which their key was first seen.
#[derive(Debug, Clone, Default)]
pub struct ChartListing {
    key_mode: KeyMode,
    entries: IndexMap<String, ChartEntry>,
}

impl ChartListing {
    pub fn new(key_mode: KeyMode) -> Self {
        Self {
            key_mode,
            entries: IndexMap::new(),
        }
    }

    /// Inserts an entry, returning the one it replaced (if any)
    pub fn insert(&mut self, entry: ChartEntry) -> Option<ChartEntry> {
        let key = match self.key_mode {
            KeyMode::Name => entry.name.clone(),
            KeyMode::Link => entry.link.clone(),
        };
        self.entries.insert(key, entry)
    }

    /// Looks an entry up by its key (name or link, depending on the mode)
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&ChartEntry> {
        self.entries.get(key)
    }

    pub fn key_mode(&self) -> KeyMode {
        self.key_mode
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartEntry> {
        self.entries.values()
    }
}

impl IntoIterator for ChartListing {
    type Item = ChartEntry;
    type IntoIter = IntoValues<String, ChartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

/// Fields scraped from an app's detail page
///
/// All values are kept verbatim as displayed by the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDetails {
    pub name: String,
    pub num_reviews: String,
    pub last_updated: String,
}

impl AppDetails {
    pub fn new(
        name: impl Into<String>,
        num_reviews: impl Into<String>,
        last_updated: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            num_reviews: num_reviews.into(),
            last_updated: last_updated.into(),
        }
    }
}

//! Run coordinator - the scrape pipeline
//!
//! A run initializes the report, lists the top chart, then fetches each
//! app's details in listing order and appends one row per app as soon as
//! it is scraped. Fetches are strictly sequential.

use crate::config::{Config, DetailFailurePolicy};
use crate::output::{ReportSink, RunSummary, TsvReport};
use crate::scrape::storefront::Storefront;
use crate::scrape::types::KeyMode;
use crate::ScrapeError;
use std::path::{Path, PathBuf};

/// Main scrape coordinator structure
pub struct Coordinator {
    storefront: Storefront,
    key_mode: KeyMode,
    policy: DetailFailurePolicy,
    output_path: PathBuf,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - HTTP client built and output path resolved
    /// * `Err(ScrapeError)` - Invalid configuration
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let storefront = Storefront::new(&config)?;
        let output_path = config.output.resolved_path()?;

        Ok(Self {
            storefront,
            key_mode: config.run.key_by,
            policy: config.run.on_detail_failure,
            output_path,
        })
    }

    /// Path the TSV report is written to
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Runs the pipeline against the TSV report at the configured path
    ///
    /// Any existing report is replaced before the chart is fetched.
    pub async fn run(&self) -> Result<RunSummary, ScrapeError> {
        let mut report = TsvReport::initialize(&self.output_path)?;
        tracing::info!("Report initialized at {}", report.path().display());
        self.run_with(&mut report).await
    }

    /// Runs the pipeline, appending rows to the given sink
    ///
    /// # Failure Handling
    ///
    /// | Failure | Skip policy | Abort policy |
    /// |---------|-------------|--------------|
    /// | Chart page unreachable or unparseable | Abort | Abort |
    /// | Detail page network / HTTP status error | Abort | Abort |
    /// | Detail page markup missing, empty link | Skip app | Abort |
    /// | Report write error | Abort | Abort |
    ///
    /// Rows appended before an abort remain in the sink.
    pub async fn run_with(&self, sink: &mut dyn ReportSink) -> Result<RunSummary, ScrapeError> {
        let mut summary = RunSummary::new(self.output_path.clone());

        let listing = self.storefront.list_top_apps(self.key_mode).await?;
        summary.apps_listed = listing.len();

        for (index, entry) in listing.into_iter().enumerate() {
            tracing::debug!(
                "[{}/{}] Fetching details for '{}' ({})",
                index + 1,
                summary.apps_listed,
                entry.name,
                entry.link
            );

            match self.storefront.fetch_details(&entry.name, &entry.link).await {
                Ok(details) => {
                    sink.append_row(&details)?;
                    summary.rows_written += 1;
                    tracing::info!(
                        "{}: {} reviews, updated {}",
                        details.name,
                        details.num_reviews,
                        details.last_updated
                    );
                }
                Err(e) if e.is_skippable() && self.policy == DetailFailurePolicy::Skip => {
                    tracing::warn!("Skipping '{}': {}", entry.name, e);
                    summary.record_skip(&entry.name, e.to_string());
                }
                Err(e) => {
                    tracing::error!("Aborting at '{}': {}", entry.name, e);
                    return Err(e);
                }
            }
        }

        summary.finish();
        Ok(summary)
    }
}

/// Runs a complete scrape with the given configuration
///
/// This is the main entry point. It will:
/// 1. Replace the report file with a fresh header
/// 2. Fetch and parse the top-charts page
/// 3. Fetch and parse each app's detail page
/// 4. Append one report row per app
///
/// # Returns
///
/// * `Ok(RunSummary)` - Run completed (possibly with skipped apps)
/// * `Err(ScrapeError)` - Run aborted; rows written so far are kept
pub async fn run_scrape(config: Config) -> Result<RunSummary, ScrapeError> {
    Coordinator::new(config)?.run().await
}

//! Run statistics
//!
//! This module records what happened during a scrape run and prints it
//! once the run is over.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// An app that was listed on the chart but left out of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedApp {
    pub name: String,
    pub reason: String,
}

/// Summary of a single scrape run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished; `None` while still running
    pub finished_at: Option<DateTime<Utc>>,

    /// Where the report was written
    pub output_path: PathBuf,

    /// Number of distinct apps found on the chart page
    pub apps_listed: usize,

    /// Number of rows appended to the report
    pub rows_written: usize,

    /// Apps whose detail page could not be scraped
    pub skipped: Vec<SkippedApp>,
}

impl RunSummary {
    /// Creates a summary for a run starting now
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            output_path,
            apps_listed: 0,
            rows_written: 0,
            skipped: Vec::new(),
        }
    }

    /// Records an app that was skipped
    pub fn record_skip(&mut self, name: &str, reason: impl Into<String>) {
        self.skipped.push(SkippedApp {
            name: name.to_string(),
            reason: reason.into(),
        });
    }

    /// Marks the run as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Returns true when every listed app made it into the report
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.rows_written == self.apps_listed
    }
}

/// Prints a run summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Scrape Summary ===\n");

    println!("Run:");
    println!("  Started: {}", summary.started_at.to_rfc3339());
    if let Some(finished) = summary.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = summary.duration_seconds() {
        println!("  Duration: {} seconds", duration);
    }
    println!();

    println!("Apps:");
    println!("  Listed on chart: {}", summary.apps_listed);
    println!("  Rows written: {}", summary.rows_written);
    println!("  Skipped: {}", summary.skipped.len());
    println!();

    if !summary.skipped.is_empty() {
        println!("Skipped Apps ({}):", summary.skipped.len());
        for app in &summary.skipped {
            println!("  - {}: {}", app.name, app.reason);
        }
        println!();
    }

    println!("Report: {}", summary.output_path.display());
}

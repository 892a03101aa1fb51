//! Report sink trait and error types
//!
//! This module defines the interface the run coordinator writes rows
//! through, and the errors a report can raise.

use crate::scrape::AppDetails;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Destination for scraped rows
///
/// Each call must leave a complete row behind before returning, so an
/// aborted run still leaves a valid prefix of the report.
pub trait ReportSink {
    /// Appends one app's details as a row
    fn append_row(&mut self, details: &AppDetails) -> ReportResult<()>;
}

/// In-memory sink, mostly useful in tests
impl ReportSink for Vec<AppDetails> {
    fn append_row(&mut self, details: &AppDetails) -> ReportResult<()> {
        self.push(details.clone());
        Ok(())
    }
}

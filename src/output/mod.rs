//! Output module for scrape reports
//!
//! This module handles:
//! - Writing the tab-separated app report
//! - The sink interface the run coordinator writes through
//! - Recording and printing run statistics

pub mod stats;
mod traits;
mod tsv;

pub use stats::{print_summary, RunSummary, SkippedApp};
pub use traits::{ReportError, ReportResult, ReportSink};
pub use tsv::{format_row, header_line, TsvReport, HEADER_COLUMNS, LINE_SEPARATOR};

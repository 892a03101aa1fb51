//! Tab-separated report writer
//!
//! The report is rebuilt on every run: the previous file is removed, a
//! fixed five-column header is written, and one row per app is appended as
//! soon as its details are scraped. Only the first three columns are ever
//! filled; `DAYS_SINCE_LAST_UPDATE` and `SCORE` are kept for format
//! compatibility and stay empty.

use crate::output::traits::{ReportError, ReportResult, ReportSink};
use crate::scrape::AppDetails;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Report header columns, in order
pub const HEADER_COLUMNS: [&str; 5] = [
    "APP_NAME",
    "NUM_REVIEWS",
    "LAST_UPDATED",
    "DAYS_SINCE_LAST_UPDATE",
    "SCORE",
];

/// Platform line separator
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";

/// Platform line separator
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Returns the header line, including the line separator
pub fn header_line() -> String {
    format!("{}{}", HEADER_COLUMNS.join("\t"), LINE_SEPARATOR)
}

/// Formats one report row, including the line separator
///
/// Tabs and line breaks inside a field are replaced by spaces so the row
/// stays a single well-formed line.
pub fn format_row(details: &AppDetails) -> String {
    format!(
        "{}\t{}\t{}{}",
        sanitize_field(&details.name),
        sanitize_field(&details.num_reviews),
        sanitize_field(&details.last_updated),
        LINE_SEPARATOR
    )
}

fn sanitize_field(field: &str) -> String {
    field
        .chars()
        .map(|c| match c {
            '\t' | '\r' | '\n' => ' ',
            other => other,
        })
        .collect()
}

/// TSV report on disk
#[derive(Debug, Clone)]
pub struct TsvReport {
    path: PathBuf,
}

impl TsvReport {
    /// Replaces any report at `path` with one holding only the header
    ///
    /// Missing parent directories are created.
    ///
    /// # Returns
    ///
    /// * `Ok(TsvReport)` - Report ready for appends
    /// * `Err(ReportError)` - The path could not be removed, created or written
    pub fn initialize(path: impl Into<PathBuf>) -> ReportResult<Self> {
        let path = path.into();
        let io_err = |source| ReportError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!("Removed previous report {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(io_err(e)),
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(io_err)?;
        file.write_all(header_line().as_bytes()).map_err(io_err)?;
        file.sync_data().map_err(io_err)?;

        Ok(Self { path })
    }

    /// Path of the report file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for TsvReport {
    /// Appends a row with a single write, creating the file if it vanished
    fn append_row(&mut self, details: &AppDetails) -> ReportResult<()> {
        let io_err = |source| ReportError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.write_all(format_row(details).as_bytes()).map_err(io_err)?;
        file.sync_data().map_err(io_err)?;

        Ok(())
    }
}

//! Append-only distraction log.
//!
//! Rows are `(timestamp, remaining)` in local time, e.g.
//!
//! ```text
//! Timestamp,TimeRemaining
//! 2026-10-14 09:41:07,20:34
//! ```
//!
//! The header is written once, and only when the file did not exist before
//! this process first wrote to it.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::LogError;
use crate::format::format_clock;

pub const DEFAULT_LOG_FILE: &str = "focus_log.csv";
pub const LOG_HEADER: [&str; 2] = ["Timestamp", "TimeRemaining"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One logged distraction. Immutable once taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistractionRecord {
    pub at: DateTime<Local>,
    pub remaining_secs: u64,
}

impl DistractionRecord {
    pub fn new(at: DateTime<Local>, remaining_secs: u64) -> Self {
        Self { at, remaining_secs }
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn timestamp(&self) -> String {
        self.at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// `MM:SS`
    pub fn remaining(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// Destination for distraction records.
pub trait DistractionSink {
    fn append(&mut self, record: &DistractionRecord) -> Result<(), LogError>;
}

/// CSV file sink.
#[derive(Debug)]
pub struct CsvDistractionLog {
    path: PathBuf,
    /// Set once the first append of this process has decided on the header.
    header_settled: bool,
}

impl CsvDistractionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            header_settled: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> LogError {
        LogError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_err(&self, source: csv::Error) -> LogError {
        LogError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

impl DistractionSink for CsvDistractionLog {
    fn append(&mut self, record: &DistractionRecord) -> Result<(), LogError> {
        let needs_header = !self.header_settled && !self.path.exists();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(LOG_HEADER).map_err(|e| self.csv_err(e))?;
        }
        writer
            .write_record([record.timestamp(), record.remaining()])
            .map_err(|e| self.csv_err(e))?;
        writer.flush().map_err(|e| self.io_err(e))?;

        self.header_settled = true;
        tracing::debug!(path = %self.path.display(), "distraction logged");
        Ok(())
    }
}

/// In-memory sink for hosts that do not persist.
#[derive(Debug, Default, Clone)]
pub struct MemoryDistractionLog {
    pub records: Vec<DistractionRecord>,
}

impl DistractionSink for MemoryDistractionLog {
    fn append(&mut self, record: &DistractionRecord) -> Result<(), LogError> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Read back `(timestamp, remaining)` rows, skipping the header.
///
/// A missing file is an empty log.
pub fn read_log(path: &Path) -> Result<Vec<(String, String)>, LogError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| LogError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| LogError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let timestamp = record.get(0).unwrap_or_default();
        let remaining = record.get(1).unwrap_or_default();
        if timestamp == LOG_HEADER[0] && remaining == LOG_HEADER[1] {
            continue;
        }
        rows.push((timestamp.to_string(), remaining.to_string()));
    }
    Ok(rows)
}

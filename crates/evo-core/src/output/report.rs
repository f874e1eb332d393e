//! Report Writers
//!
//! Append generation reports to a CSV or JSON-lines results file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use evo_events::{GenerationReport, CSV_HEADER};

/// Output format of a results file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    JsonLines,
}

/// Errors that can occur while writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Buffered writer of generation reports
pub struct ReportWriter {
    writer: BufWriter<File>,
    format: ReportFormat,
    rows: u64,
}

impl ReportWriter {
    /// Create (or truncate) a results file, creating parent directories.
    /// CSV files start with the header row.
    pub fn create(path: impl AsRef<Path>, format: ReportFormat) -> Result<Self, ReportError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(path)?);
        if format == ReportFormat::Csv {
            writeln!(writer, "{}", CSV_HEADER)?;
        }

        Ok(Self {
            writer,
            format,
            rows: 0,
        })
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Rows written so far, excluding any header.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn write(&mut self, report: &GenerationReport) -> Result<(), ReportError> {
        match self.format {
            ReportFormat::Csv => writeln!(self.writer, "{}", report.to_csv_row())?,
            ReportFormat::JsonLines => {
                let json = serde_json::to_string(report)?;
                writeln!(self.writer, "{}", json)?;
            }
        }
        self.rows += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), ReportError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for ReportWriter {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush report writer: {}", e);
        }
    }
}

//! exporters — Renderers that turn a [`Report`] into a portable document.
//!
//! - **Text**: sectioned plain text (overview, category breakdown, alerts,
//!   recommendations), the default
//! - **JSON**: the full report record, for machine consumers
//!
//! A rendered document is handed to a [`ReportSink`] under the name
//! `goal-report-<period>-<date>.<ext>`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use horizon_goal::Period;

use crate::error::ReportError;
use crate::report::Report;

pub mod json;
pub mod text;

pub use text::RenderedCounts;

/// Export format for report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ReportError::InvalidData(format!(
                "Invalid export format: '{}'. Valid formats: text, json",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Renders reports in one format.
pub trait Exporter {
    fn render(&self, report: &Report) -> Result<String, ReportError>;

    /// Exporter name (for logging/debugging).
    fn name(&self) -> &str;

    /// Extension used in exported file names.
    fn file_extension(&self) -> &str;
}

/// Get an exporter instance for the given format.
pub fn exporter_for(format: ExportFormat) -> Box<dyn Exporter> {
    match format {
        ExportFormat::Text => Box::new(text::TextExporter::new()),
        ExportFormat::Json => Box::new(json::JsonExporter::new()),
    }
}

/// `goal-report-<period>-<YYYY-MM-DD>.<ext>`
pub fn report_filename(period: Period, date: NaiveDate, extension: &str) -> String {
    format!(
        "goal-report-{}-{}.{}",
        period,
        date.format("%Y-%m-%d"),
        extension
    )
}

/// Destination for rendered report documents.
pub trait ReportSink {
    fn accept(&self, filename: &str, document: &str) -> Result<(), ReportError>;
}

/// Writes each document as a UTF-8 file in a directory.
pub struct FileReportSink {
    dir: PathBuf,
}

impl FileReportSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportSink for FileReportSink {
    fn accept(&self, filename: &str, document: &str) -> Result<(), ReportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ReportError::IoError {
            path: self.dir.display().to_string(),
            source,
        })?;
        let path = self.dir.join(filename);
        fs::write(&path, document).map_err(|source| ReportError::IoError {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Render `report` and hand it to `sink`. Returns the file name used.
pub fn export_report(
    report: &Report,
    format: ExportFormat,
    sink: &dyn ReportSink,
) -> Result<String, ReportError> {
    let exporter = exporter_for(format);
    let document = exporter.render(report)?;
    let filename = report_filename(report.period, report.as_of, exporter.file_extension());
    sink.accept(&filename, &document)?;
    tracing::info!(
        exporter = exporter.name(),
        period = %report.period,
        filename = %filename,
        "report exported"
    );
    Ok(filename)
}

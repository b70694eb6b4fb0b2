// error.rs — Error types for report rendering and export.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to serialize a report.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// A rendered document lacks an expected count line.
    #[error("rendered report is missing field '{0}'")]
    MissingField(String),

    /// Malformed input (bad format name, unparsable pattern).
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<regex::Error> for ReportError {
    fn from(e: regex::Error) -> Self {
        ReportError::InvalidData(format!("pattern error: {}", e))
    }
}

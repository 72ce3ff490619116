//! Ingestion errors.

use super::error_code::{self, RiskErrorCode};

/// Errors raised while reading relationship tables.
///
/// `Io` and `Csv` are fatal for the file being read; `MalformedField`
/// rejects a single row and is collected as a non-fatal error.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("CSV error in {path}: {message}")]
    Csv { path: String, message: String },

    #[error("Row {line}: malformed {field} value {value:?}")]
    MalformedField {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("Row {line}: missing column {column}")]
    MissingColumn { line: u64, column: usize },

    #[error("Invalid exclusion pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl RiskErrorCode for IngestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedField { .. } | Self::MissingColumn { .. } => error_code::MALFORMED_ROW,
            _ => error_code::INGEST_ERROR,
        }
    }
}

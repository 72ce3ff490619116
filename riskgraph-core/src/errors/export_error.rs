//! Export errors.

use super::error_code::{self, RiskErrorCode};

/// Errors that can occur while writing result documents.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Cannot write {path}: {message}")]
    Io { path: String, message: String },

    #[error("Serialization failed for {document}: {message}")]
    Serialize { document: String, message: String },
}

impl RiskErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        error_code::EXPORT_ERROR
    }
}

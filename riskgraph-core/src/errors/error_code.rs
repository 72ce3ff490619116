//! RiskErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable machine-readable
/// code alongside its human-readable message.
pub trait RiskErrorCode {
    /// Returns the error code string (e.g., "INGEST_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged error string: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INGEST_ERROR: &str = "INGEST_ERROR";
pub const MALFORMED_ROW: &str = "MALFORMED_ROW";
pub const INVALID_GRAPH: &str = "INVALID_GRAPH";
pub const EXPORT_ERROR: &str = "EXPORT_ERROR";
pub const THREAD_POOL_ERROR: &str = "THREAD_POOL_ERROR";

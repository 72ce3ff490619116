//! Error handling for riskgraph.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod export_error;
pub mod graph_error;
pub mod ingest_error;
pub mod pipeline_error;

pub use config_error::ConfigError;
pub use error_code::RiskErrorCode;
pub use export_error::ExportError;
pub use graph_error::GraphError;
pub use ingest_error::IngestError;
pub use pipeline_error::{PipelineError, PipelineResult};

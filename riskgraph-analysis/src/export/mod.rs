//! JSON export of analysis results as `{ "nodes": [...], "links": [...] }`
//! documents, grouped into buckets and chunked by node count.

pub mod collection;
pub mod control;
pub mod guarantee;
pub mod types;

pub use collection::{build_collection_documents, export_collection, CollectionDocuments};
pub use control::{build_control_documents, export_control, ControlDocuments};
pub use guarantee::{build_guarantee_documents, export_guarantee, GuaranteeDocuments};
pub use types::{ExportSummary, GraphDocument, NodeChunker};

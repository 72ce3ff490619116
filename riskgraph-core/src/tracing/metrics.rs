//! Structured field names used in tracing events across riskgraph.
//!
//! Consistent names keep log queries stable across subsystems.

/// Number of subgraphs produced by the partitioner.
pub const SUBGRAPH_COUNT: &str = "subgraph_count";

/// Number of subgraphs rejected by validation.
pub const REJECTED_COUNT: &str = "rejected_count";

/// Number of confirmed shell-enterprise triads.
pub const TRIAD_COUNT: &str = "triad_count";

/// Wall time of a dataset run in milliseconds.
pub const DATASET_TIME_MS: &str = "dataset_time_ms";

/// Rows accepted by ingestion.
pub const ROWS_ACCEPTED: &str = "rows_accepted";

/// Rows skipped by ingestion filters.
pub const ROWS_SKIPPED: &str = "rows_skipped";

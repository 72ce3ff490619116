//! # riskgraph-analysis
//!
//! Risk-pattern classification over relationship graphs. Three datasets
//! flow through the same partitioner: guarantees (risk typing and
//! exposure), fund collection (shell-enterprise triads and net flow), and
//! equity control (root resolution). Ingestion and export sit at the edges.

pub mod collection;
pub mod control;
pub mod export;
pub mod graph;
pub mod guarantee;
pub mod ingest;
pub mod pipeline;
pub mod weights;

pub use pipeline::RiskPipeline;

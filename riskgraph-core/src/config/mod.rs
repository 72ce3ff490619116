//! Configuration system for riskgraph.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod collection_config;
pub mod export_config;
pub mod guarantee_config;
pub mod ingest_config;
pub mod riskgraph_config;
pub mod runtime_config;
pub mod weight_range;

pub use collection_config::CollectionConfig;
pub use export_config::ExportConfig;
pub use guarantee_config::GuaranteeConfig;
pub use ingest_config::{CollectionColumns, IngestConfig};
pub use riskgraph_config::{CliOverrides, RiskGraphConfig};
pub use runtime_config::RuntimeConfig;
pub use weight_range::WeightRange;

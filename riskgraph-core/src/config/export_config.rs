//! Export configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Where and how result documents are written.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Output directory. Default: `./out`.
    pub output_dir: Option<String>,
    /// Node budget per two-node guarantee chunk. Default: 2950.
    pub guarantee_chunk_nodes: Option<usize>,
    /// Node budget per fund-collection chunk. Default: 1500.
    pub collection_chunk_nodes: Option<usize>,
    /// Node budget per control chunk. Default: 3000.
    pub control_chunk_nodes: Option<usize>,
    /// Pretty-print JSON. Default: false.
    pub pretty: Option<bool>,
}

impl ExportConfig {
    pub fn effective_output_dir(&self) -> String {
        self.output_dir.clone().unwrap_or_else(|| "out".to_string())
    }

    pub fn effective_guarantee_chunk_nodes(&self) -> usize {
        self.guarantee_chunk_nodes
            .unwrap_or(constants::DEFAULT_GUARANTEE_CHUNK_NODES)
    }

    pub fn effective_collection_chunk_nodes(&self) -> usize {
        self.collection_chunk_nodes
            .unwrap_or(constants::DEFAULT_COLLECTION_CHUNK_NODES)
    }

    pub fn effective_control_chunk_nodes(&self) -> usize {
        self.control_chunk_nodes
            .unwrap_or(constants::DEFAULT_CONTROL_CHUNK_NODES)
    }

    pub fn effective_pretty(&self) -> bool {
        self.pretty.unwrap_or(false)
    }
}

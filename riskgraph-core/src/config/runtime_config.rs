//! Runtime configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Worker threads for per-subgraph analysis. 0 = auto. Default: 0.
    pub threads: Option<usize>,
}

impl RuntimeConfig {
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(constants::DEFAULT_THREADS)
    }
}

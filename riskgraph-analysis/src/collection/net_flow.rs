//! Per-account net inflow: loans received minus transfers sent.

use riskgraph_core::config::{CollectionConfig, WeightRange};

use super::types::{CollectionGraph, FlowKind};
use crate::weights::rescale;

/// Computes net inflow and its visual weight for every account.
#[derive(Debug, Clone, Copy)]
pub struct NetFlowAnalyzer {
    range: WeightRange,
}

impl NetFlowAnalyzer {
    pub fn new(range: WeightRange) -> Self {
        Self { range }
    }

    pub fn from_config(config: &CollectionConfig) -> Self {
        Self::new(config.effective_weight_range())
    }

    /// Parallel relationships each contribute.
    pub fn analyze(&self, graph: &mut CollectionGraph) {
        let mut net = vec![0.0; graph.entity_count()];
        for (from, to, tx) in graph.relationships() {
            match tx.kind {
                FlowKind::Loan => net[to.index()] += tx.amount,
                FlowKind::Transfer => net[from.index()] -= tx.amount,
            }
        }

        let magnitudes: Vec<f64> = net.iter().map(|v: &f64| v.abs()).collect();
        let weights = rescale(&magnitudes, &self.range);
        let indices: Vec<_> = graph.graph.node_indices().collect();
        for (i, idx) in indices.into_iter().enumerate() {
            let account = graph.entity_mut(idx);
            account.net_inflow = net[i];
            account.weight = weights[i];
        }
    }
}

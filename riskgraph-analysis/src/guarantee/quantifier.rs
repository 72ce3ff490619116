//! Exposure scoring: each entity's share of subgraph guarantee volume.

use riskgraph_core::config::{GuaranteeConfig, WeightRange};
use riskgraph_core::types::collections::FxHashMap;

use super::types::GuaranteeGraph;
use crate::weights::rescale;

/// Computes exposure and visual weight for guarantee entities.
#[derive(Debug, Clone, Copy)]
pub struct RiskQuantifier {
    range: WeightRange,
}

impl RiskQuantifier {
    pub fn new(range: WeightRange) -> Self {
        Self { range }
    }

    pub fn from_config(config: &GuaranteeConfig) -> Self {
        Self::new(config.effective_weight_range())
    }

    /// Score every entity of `graph`.
    ///
    /// Relationships are projected onto an undirected graph first; when both
    /// directions exist between a pair, the later relationship's amount
    /// stands for the pair. Exposure is the sum over an entity's neighbors
    /// of `amount / total`. Idempotent for an unchanged graph.
    pub fn quantify(&self, graph: &mut GuaranteeGraph) {
        let mut undirected: FxHashMap<(usize, usize), f64> = FxHashMap::default();
        let mut pair_order: Vec<(usize, usize)> = Vec::new();
        for (u, v, link) in graph.relationships() {
            let key = if u.index() <= v.index() {
                (u.index(), v.index())
            } else {
                (v.index(), u.index())
            };
            if undirected.insert(key, link.amount).is_none() {
                pair_order.push(key);
            }
        }

        let total: f64 = pair_order.iter().map(|k| undirected[k]).sum();
        let mut exposure = vec![0.0; graph.entity_count()];
        if total > 0.0 {
            for key in &pair_order {
                let share = undirected[key] / total;
                exposure[key.0] += share;
                exposure[key.1] += share;
            }
        }

        let weights = rescale(&exposure, &self.range);
        let indices: Vec<_> = graph.graph.node_indices().collect();
        for (i, idx) in indices.into_iter().enumerate() {
            let entity = graph.entity_mut(idx);
            entity.exposure = exposure[i];
            entity.weight = weights[i];
        }
    }
}

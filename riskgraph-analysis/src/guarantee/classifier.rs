//! Guarantee risk typing: degree roles, cycle roles, then the chain default.

use petgraph::graph::NodeIndex;
use riskgraph_core::config::GuaranteeConfig;
use riskgraph_core::constants;

use super::types::{GuaranteeGraph, RiskTag};
use crate::graph::{CycleEnumerator, CycleKind, ResidualGraph};

/// Degree thresholds for hub and sink roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuaranteeRules {
    pub hub_out_degree: usize,
    pub focus_in_degree: usize,
}

impl Default for GuaranteeRules {
    fn default() -> Self {
        Self {
            hub_out_degree: constants::DEFAULT_HUB_OUT_DEGREE,
            focus_in_degree: constants::DEFAULT_FOCUS_IN_DEGREE,
        }
    }
}

impl GuaranteeRules {
    pub fn from_config(config: &GuaranteeConfig) -> Self {
        Self {
            hub_out_degree: config.effective_hub_out_degree(),
            focus_in_degree: config.effective_focus_in_degree(),
        }
    }
}

/// What the cycle passes found in one subgraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationStats {
    /// Entities left after the two-stage peel, bridges between cycles included.
    pub residual_size: usize,
    pub mutual_pairs: usize,
    pub circles: usize,
}

/// Assigns non-exclusive risk tags to every entity of a guarantee subgraph.
#[derive(Debug, Clone, Default)]
pub struct RiskClassifier {
    rules: GuaranteeRules,
}

impl RiskClassifier {
    pub fn new(rules: GuaranteeRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &GuaranteeRules {
        &self.rules
    }

    /// Tag every entity of `graph`. The passes run in a fixed order: two-node
    /// short cut, degree roles, cycle roles, and finally the chain default.
    pub fn classify(&self, graph: &mut GuaranteeGraph) -> ClassificationStats {
        if graph.entity_count() == 2 {
            self.classify_pair(graph);
            return ClassificationStats::default();
        }

        let edges: Vec<(NodeIndex, NodeIndex)> =
            graph.relationships().map(|(u, v, _)| (u, v)).collect();

        // Degree roles
        for &(u, v) in &edges {
            if graph.out_degree(u) >= self.rules.hub_out_degree {
                graph.entity_mut(u).tags.insert(RiskTag::Cross);
            }
            if graph.in_degree(v) >= self.rules.focus_in_degree {
                graph.entity_mut(v).tags.insert(RiskTag::Focus);
            }
        }

        let stats = self.tag_cycles(graph);

        // Chain only where nothing else applied
        for &(u, v) in &edges {
            for idx in [u, v] {
                let tags = &mut graph.entity_mut(idx).tags;
                if tags.is_empty() {
                    tags.insert(RiskTag::Chain);
                }
            }
        }

        stats
    }

    fn classify_pair(&self, graph: &mut GuaranteeGraph) {
        let nodes: Vec<NodeIndex> = graph.graph.node_indices().collect();
        let (a, b) = (nodes[0], nodes[1]);
        let tag = if graph.has_relationship(a, b) && graph.has_relationship(b, a) {
            RiskTag::Mutual
        } else {
            RiskTag::Normal
        };
        for idx in nodes {
            graph.entity_mut(idx).tags.insert(tag);
        }
    }

    fn tag_cycles(&self, graph: &mut GuaranteeGraph) -> ClassificationStats {
        let residual = ResidualGraph::from_graph(&graph.graph).cycle_residual();
        let mut stats = ClassificationStats {
            residual_size: residual.len(),
            ..Default::default()
        };
        if residual.is_empty() {
            return stats;
        }

        for (a, b) in residual.reciprocal_pairs() {
            graph.entity_mut(a).tags.insert(RiskTag::Mutual);
            graph.entity_mut(b).tags.insert(RiskTag::Mutual);
            stats.mutual_pairs += 1;
        }

        for cycle in CycleEnumerator::new(&residual).enumerate() {
            let tag = match cycle.kind {
                CycleKind::Mutual => RiskTag::Mutual,
                CycleKind::Circle => {
                    stats.circles += 1;
                    RiskTag::Circle
                }
            };
            for idx in cycle.members {
                graph.entity_mut(idx).tags.insert(tag);
            }
        }

        tracing::trace!(
            residual = stats.residual_size,
            mutual_pairs = stats.mutual_pairs,
            circles = stats.circles,
            "cycle roles assigned"
        );
        stats
    }
}

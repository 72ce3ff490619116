//! Ultimate-controller lookup and cross-holding detection.

use petgraph::graph::NodeIndex;

use super::types::ControlGraph;
use crate::graph::{PeelDirection, ResidualGraph};

/// Result of resolving one control subgraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootOutcome {
    pub root: Option<NodeIndex>,
    /// Entities tagged cross-held.
    pub cross_held: usize,
}

pub struct RootResolver;

impl RootResolver {
    /// Mark the root (first entity nobody holds) and any cross-held entities.
    ///
    /// With a root, a forward peel leaves only local cross-holding clusters.
    /// Without one, every entity has a holder, so the reverse peel strips
    /// the held-only tails and leaves the cross-holding core.
    pub fn resolve(graph: &mut ControlGraph) -> RootOutcome {
        let root = graph
            .graph
            .node_indices()
            .find(|&idx| graph.in_degree(idx) == 0);

        let direction = match root {
            Some(idx) => {
                graph.entity_mut(idx).is_root = true;
                PeelDirection::Forward
            }
            None => PeelDirection::Reverse,
        };

        let survivors = ResidualGraph::from_graph(&graph.graph).peel(direction);
        for &idx in survivors.nodes() {
            graph.entity_mut(idx).is_cross_held = true;
        }

        RootOutcome {
            root,
            cross_held: survivors.len(),
        }
    }
}

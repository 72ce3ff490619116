//! Pre-classification checks that reject a whole subgraph.

use riskgraph_core::errors::GraphError;

use super::types::{EntityGraph, Keyed, Weighted};

/// Reject subgraphs carrying self-loops or non-finite/negative amounts.
pub fn validate_subgraph<N: Keyed, E: Weighted>(
    subgraph: usize,
    graph: &EntityGraph<N, E>,
) -> Result<(), GraphError> {
    for (from, to, edge) in graph.relationships() {
        if from == to {
            return Err(GraphError::SelfLoop {
                subgraph,
                entity: graph.key_of(from).to_string(),
            });
        }
        let amount = edge.amount();
        if !amount.is_finite() || amount < 0.0 {
            return Err(GraphError::InvalidAmount {
                subgraph,
                from: graph.key_of(from).to_string(),
                to: graph.key_of(to).to_string(),
                amount,
            });
        }
    }
    Ok(())
}

//! Weakly-connected component partitioning via union-find.

use petgraph::graph::NodeIndex;
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use riskgraph_core::tracing::metrics;
use riskgraph_core::types::collections::FxHashMap;

use super::types::{EntityGraph, Keyed};

/// Splits a relationship graph into independent subgraphs.
pub struct GraphPartitioner;

impl GraphPartitioner {
    /// Consume `graph` and return its maximal weakly-connected components.
    ///
    /// Components are ordered by their first entity in insertion order;
    /// entity and relationship order inside each component is preserved.
    /// Entities with no relationships are dropped.
    pub fn partition<N: Keyed, E>(graph: EntityGraph<N, E>) -> Vec<EntityGraph<N, E>> {
        let node_count = graph.graph.node_count();
        let mut sets = UnionFind::<usize>::new(node_count);
        let mut linked = vec![false; node_count];
        for edge in graph.graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            sets.union(a, b);
            linked[a] = true;
            linked[b] = true;
        }

        let (nodes, edges) = graph.graph.into_nodes_edges();
        let mut slots: FxHashMap<usize, usize> = FxHashMap::default();
        let mut parts: Vec<EntityGraph<N, E>> = Vec::new();
        let mut placement: Vec<Option<(usize, NodeIndex)>> = vec![None; node_count];

        for (i, node) in nodes.into_iter().enumerate() {
            if !linked[i] {
                continue;
            }
            let root = sets.find(i);
            let slot = *slots.entry(root).or_insert_with(|| {
                parts.push(EntityGraph::new());
                parts.len() - 1
            });
            let idx = parts[slot].insert_entity(node.weight);
            placement[i] = Some((slot, idx));
        }

        for edge in edges {
            let source = placement[edge.source().index()];
            let target = placement[edge.target().index()];
            if let (Some((slot, a)), Some((_, b))) = (source, target) {
                parts[slot].graph.add_edge(a, b, edge.weight);
            }
        }

        tracing::debug!({ metrics::SUBGRAPH_COUNT } = parts.len(), "graph partitioned");
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Node(String);

    impl Keyed for Node {
        fn key(&self) -> &str {
            &self.0
        }
        fn from_key(key: &str) -> Self {
            Node(key.to_string())
        }
    }

    #[test]
    fn test_components_in_first_appearance_order() {
        let mut g: EntityGraph<Node, ()> = EntityGraph::new();
        g.add_relationship("x", "y", ());
        g.add_relationship("a", "b", ());
        g.add_relationship("z", "y", ());
        g.insert_entity(Node("lonely".into()));

        let parts = GraphPartitioner::partition(g);
        assert_eq!(parts.len(), 2);
        let keys: Vec<Vec<&str>> = parts
            .iter()
            .map(|p| p.entities().map(|(_, n)| n.key()).collect())
            .collect();
        assert_eq!(keys, vec![vec!["x", "y", "z"], vec!["a", "b"]]);
        assert_eq!(parts[0].relationship_count(), 2);
    }
}

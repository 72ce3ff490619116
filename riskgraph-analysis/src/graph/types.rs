//! Keyed entity graph: a petgraph `DiGraph` arena plus a key → index map.

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use riskgraph_core::types::collections::{FxHashMap, FxHashSet};

/// An entity payload addressable by its normalized identifier.
pub trait Keyed {
    fn key(&self) -> &str;

    /// Fresh entity for a key seen for the first time.
    fn from_key(key: &str) -> Self;
}

/// A relationship payload carrying a monetary amount (or rate).
pub trait Weighted {
    fn amount(&self) -> f64;
}

/// Directed relationship graph with O(1) entity lookup by key.
///
/// Entities are created on first reference, so every node is the endpoint
/// of at least one relationship unless inserted explicitly. Parallel
/// relationships are kept by `add_relationship`; `upsert_relationship`
/// gives simple-digraph semantics instead.
#[derive(Debug, Clone)]
pub struct EntityGraph<N, E> {
    /// The underlying petgraph arena.
    pub graph: DiGraph<N, E>,
    /// Map from entity key → NodeIndex.
    pub node_index: FxHashMap<String, NodeIndex>,
}

impl<N, E> Default for EntityGraph<N, E> {
    fn default() -> Self {
        Self {
            graph: DiGraph::new(),
            node_index: FxHashMap::default(),
        }
    }
}

impl<N: Keyed, E> EntityGraph<N, E> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn relationship_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up an entity by key.
    pub fn get_node(&self, key: &str) -> Option<NodeIndex> {
        self.node_index.get(key).copied()
    }

    /// Look up an entity payload by key.
    pub fn get(&self, key: &str) -> Option<&N> {
        self.get_node(key).map(|idx| &self.graph[idx])
    }

    pub fn entity(&self, idx: NodeIndex) -> &N {
        &self.graph[idx]
    }

    pub fn entity_mut(&mut self, idx: NodeIndex) -> &mut N {
        &mut self.graph[idx]
    }

    /// Insert an entity, returning the existing index if its key is known.
    pub fn insert_entity(&mut self, node: N) -> NodeIndex {
        if let Some(&existing) = self.node_index.get(node.key()) {
            return existing;
        }
        let key = node.key().to_string();
        let idx = self.graph.add_node(node);
        self.node_index.insert(key, idx);
        idx
    }

    /// Get-or-create the entity for `key`.
    pub fn ensure_entity(&mut self, key: &str) -> NodeIndex {
        match self.node_index.get(key) {
            Some(&idx) => idx,
            None => self.insert_entity(N::from_key(key)),
        }
    }

    /// Append a relationship, keeping any parallel ones.
    pub fn add_relationship(&mut self, from: &str, to: &str, edge: E) -> EdgeIndex {
        let a = self.ensure_entity(from);
        let b = self.ensure_entity(to);
        self.graph.add_edge(a, b, edge)
    }

    /// Add a relationship or replace the payload of the existing `from → to` one.
    pub fn upsert_relationship(&mut self, from: &str, to: &str, edge: E) -> EdgeIndex {
        let a = self.ensure_entity(from);
        let b = self.ensure_entity(to);
        self.graph.update_edge(a, b, edge)
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = (NodeIndex, &N)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Relationships in insertion order.
    pub fn relationships(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &E)> {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }

    pub fn has_relationship(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.graph.contains_edge(from, to)
    }

    /// Number of distinct successors.
    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.distinct_neighbors(idx, Direction::Outgoing)
    }

    /// Number of distinct predecessors.
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.distinct_neighbors(idx, Direction::Incoming)
    }

    fn distinct_neighbors(&self, idx: NodeIndex, dir: Direction) -> usize {
        self.graph
            .neighbors_directed(idx, dir)
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// Key of the entity at `idx`.
    pub fn key_of(&self, idx: NodeIndex) -> &str {
        self.graph[idx].key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
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
    fn test_entities_created_once() {
        let mut g: EntityGraph<Node, f64> = EntityGraph::new();
        g.add_relationship("a", "b", 1.0);
        g.add_relationship("a", "b", 2.0);
        g.add_relationship("b", "c", 3.0);
        assert_eq!(g.entity_count(), 3);
        assert_eq!(g.relationship_count(), 3);
        let a = g.get_node("a").unwrap();
        // Parallel edges count once toward degree
        assert_eq!(g.out_degree(a), 1);
    }

    #[test]
    fn test_upsert_replaces_payload() {
        let mut g: EntityGraph<Node, f64> = EntityGraph::new();
        g.upsert_relationship("a", "b", 1.0);
        g.upsert_relationship("a", "b", 5.0);
        assert_eq!(g.relationship_count(), 1);
        let amounts: Vec<f64> = g.relationships().map(|(_, _, w)| *w).collect();
        assert_eq!(amounts, vec![5.0]);
    }
}

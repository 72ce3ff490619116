//! Repeated topological peeling to isolate the cycle-bearing residual.

use std::collections::VecDeque;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use riskgraph_core::types::collections::{FxHashMap, FxHashSet};

/// Which side a peel strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeelDirection {
    /// Strip entities with no remaining predecessors.
    Forward,
    /// Strip entities with no remaining successors (a forward peel of the
    /// edge-reversed graph).
    Reverse,
}

/// Simple-digraph projection used for peeling and cycle search.
///
/// Parallel relationships collapse to one edge and self-loops are dropped.
/// Nodes and successor lists keep the order of the source graph, so every
/// traversal over a residual is deterministic.
#[derive(Debug, Clone, Default)]
pub struct ResidualGraph {
    nodes: Vec<NodeIndex>,
    position: FxHashMap<NodeIndex, usize>,
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
}

impl ResidualGraph {
    /// Project a petgraph graph.
    pub fn from_graph<N, E>(graph: &DiGraph<N, E>) -> Self {
        Self::from_edges(
            graph.node_indices(),
            graph.edge_references().map(|e| (e.source(), e.target())),
        )
    }

    /// Build from an explicit node order and edge list. Edge endpoints not in
    /// `nodes` are appended in first-seen order.
    pub fn from_edges(
        nodes: impl IntoIterator<Item = NodeIndex>,
        edges: impl IntoIterator<Item = (NodeIndex, NodeIndex)>,
    ) -> Self {
        let mut residual = Self::default();
        for node in nodes {
            residual.slot(node);
        }
        let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
        for (from, to) in edges {
            let a = residual.slot(from);
            let b = residual.slot(to);
            if a != b && seen.insert((a, b)) {
                residual.successors[a].push(b);
                residual.predecessors[b].push(a);
            }
        }
        residual
    }

    fn slot(&mut self, node: NodeIndex) -> usize {
        if let Some(&pos) = self.position.get(&node) {
            return pos;
        }
        let pos = self.nodes.len();
        self.nodes.push(node);
        self.position.insert(node, pos);
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        pos
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    /// Nodes in residual order.
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.position.contains_key(&node)
    }

    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        match (self.position.get(&from), self.position.get(&to)) {
            (Some(&a), Some(&b)) => self.successors[a].contains(&b),
            _ => false,
        }
    }

    /// Successors of `node` in edge order.
    pub fn successors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.position
            .get(&node)
            .into_iter()
            .flat_map(move |&pos| self.successors[pos].iter().map(move |&s| self.nodes[s]))
    }

    pub(crate) fn position_of(&self, node: NodeIndex) -> Option<usize> {
        self.position.get(&node).copied()
    }

    pub(crate) fn successor_positions(&self, pos: usize) -> &[usize] {
        &self.successors[pos]
    }

    pub(crate) fn node_at(&self, pos: usize) -> NodeIndex {
        self.nodes[pos]
    }

    /// Strip zero in-degree (forward) or zero out-degree (reverse) nodes
    /// until a pass removes nothing; return the survivors.
    pub fn peel(&self, direction: PeelDirection) -> ResidualGraph {
        let (outward, inward) = match direction {
            PeelDirection::Forward => (&self.successors, &self.predecessors),
            PeelDirection::Reverse => (&self.predecessors, &self.successors),
        };

        let mut remaining: Vec<usize> = inward.iter().map(Vec::len).collect();
        let mut removed = vec![false; self.nodes.len()];
        let mut queue: VecDeque<usize> = (0..self.nodes.len())
            .filter(|&pos| remaining[pos] == 0)
            .collect();

        while let Some(pos) = queue.pop_front() {
            removed[pos] = true;
            for &next in &outward[pos] {
                remaining[next] -= 1;
                if remaining[next] == 0 {
                    queue.push_back(next);
                }
            }
        }

        self.retain(|pos| !removed[pos])
    }

    /// Forward peel, then a reverse peel of that result.
    ///
    /// The reverse stage strips pendant branches hanging off a cycle. What
    /// remains is a superset of the cycle members: an entity bridging one
    /// cycle into another keeps both a predecessor and a successor and
    /// survives too. Empty iff the graph is acyclic.
    pub fn cycle_residual(&self) -> ResidualGraph {
        self.peel(PeelDirection::Forward)
            .peel(PeelDirection::Reverse)
    }

    /// Unordered reciprocal pairs `(a, b)` with `a` before `b` in residual order.
    pub fn reciprocal_pairs(&self) -> Vec<(NodeIndex, NodeIndex)> {
        let mut pairs = Vec::new();
        for (a, succ) in self.successors.iter().enumerate() {
            for &b in succ {
                if a < b && self.successors[b].contains(&a) {
                    pairs.push((self.nodes[a], self.nodes[b]));
                }
            }
        }
        pairs
    }

    fn retain(&self, keep: impl Fn(usize) -> bool) -> ResidualGraph {
        let keep = &keep;
        let nodes = (0..self.nodes.len())
            .filter(move |&pos| keep(pos))
            .map(|pos| self.nodes[pos]);
        let edges = self
            .successors
            .iter()
            .enumerate()
            .filter(move |&(a, _)| keep(a))
            .flat_map(move |(a, succ)| {
                succ.iter()
                    .filter(move |&&b| keep(b))
                    .map(move |&b| (self.nodes[a], self.nodes[b]))
            });
        ResidualGraph::from_edges(nodes, edges)
    }
}

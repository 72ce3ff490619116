//! Depth-first cycle recovery over a peeled residual graph.
//!
//! The traversal keeps an explicit frame stack of `(node, next child)` so
//! deep residuals never touch the call stack, and an explicit active path
//! from which closed cycles are sliced.

use petgraph::graph::NodeIndex;

use super::peel::ResidualGraph;

/// Shape of a closed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleKind {
    /// Two entities pointing at each other.
    Mutual,
    /// Three or more distinct entities.
    Circle,
}

/// A cycle closed during the traversal, members in path order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedCycle {
    pub members: Vec<NodeIndex>,
    pub kind: CycleKind,
}

/// Recovers cycles from a residual produced by `ResidualGraph::cycle_residual`.
pub struct CycleEnumerator<'a> {
    residual: &'a ResidualGraph,
}

impl<'a> CycleEnumerator<'a> {
    pub fn new(residual: &'a ResidualGraph) -> Self {
        Self { residual }
    }

    /// Traverse from every residual node in residual order.
    pub fn enumerate(&self) -> Vec<DetectedCycle> {
        self.enumerate_with_roots(self.residual.nodes().iter().copied())
    }

    /// Traverse starting from `roots` in the given order, then from any
    /// residual node the roots did not reach. Unknown roots are ignored.
    pub fn enumerate_with_roots(
        &self,
        roots: impl IntoIterator<Item = NodeIndex>,
    ) -> Vec<DetectedCycle> {
        let len = self.residual.len();
        let mut seen = vec![false; len];
        let mut path_slot: Vec<Option<usize>> = vec![None; len];
        let mut path: Vec<usize> = Vec::new();
        let mut frames: Vec<(usize, usize)> = Vec::new();
        let mut cycles = Vec::new();

        let starts = roots
            .into_iter()
            .filter_map(|root| self.residual.position_of(root))
            .chain(0..len);

        for start in starts {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            path_slot[start] = Some(0);
            path.push(start);
            frames.push((start, 0));

            while let Some(frame) = frames.last_mut() {
                let (node, next) = *frame;
                let children = self.residual.successor_positions(node);
                if next < children.len() {
                    frame.1 += 1;
                    let child = children[next];
                    if !seen[child] {
                        seen[child] = true;
                        path_slot[child] = Some(path.len());
                        path.push(child);
                        frames.push((child, 0));
                    } else if let Some(at) = path_slot[child] {
                        cycles.push(self.closed(&path[at..]));
                    }
                } else {
                    frames.pop();
                    path.pop();
                    path_slot[node] = None;
                }
            }
        }
        cycles
    }

    fn closed(&self, slice: &[usize]) -> DetectedCycle {
        let members: Vec<NodeIndex> = slice.iter().map(|&p| self.residual.node_at(p)).collect();
        let kind = if members.len() > 2 {
            CycleKind::Circle
        } else {
            CycleKind::Mutual
        };
        DetectedCycle { members, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residual(edges: &[(usize, usize)]) -> ResidualGraph {
        ResidualGraph::from_edges(
            std::iter::empty(),
            edges
                .iter()
                .map(|&(a, b)| (NodeIndex::new(a), NodeIndex::new(b))),
        )
        .cycle_residual()
    }

    #[test]
    fn test_disjoint_clusters_all_found() {
        // Two independent 3-cycles in one residual
        let g = residual(&[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        let cycles = CycleEnumerator::new(&g).enumerate();
        assert_eq!(cycles.len(), 2);
        assert!(cycles.iter().all(|c| c.kind == CycleKind::Circle));
    }

    #[test]
    fn test_two_cycle_is_mutual() {
        let g = residual(&[(0, 1), (1, 0)]);
        let cycles = CycleEnumerator::new(&g).enumerate();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].kind, CycleKind::Mutual);
        assert_eq!(cycles[0].members.len(), 2);
    }
}

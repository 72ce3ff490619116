//! Partitioning, peeling, cycle recovery, and subgraph validation over
//! keyed entity graphs.

use riskgraph_analysis::graph::{
    validate_subgraph, CycleEnumerator, CycleKind, EntityGraph, GraphPartitioner, Keyed,
    PeelDirection, ResidualGraph, Weighted,
};
use riskgraph_core::errors::GraphError;

#[derive(Debug, Clone, PartialEq)]
struct Firm(String);

impl Keyed for Firm {
    fn key(&self) -> &str {
        &self.0
    }
    fn from_key(key: &str) -> Self {
        Firm(key.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Amount(f64);

impl Weighted for Amount {
    fn amount(&self) -> f64 {
        self.0
    }
}

fn build(edges: &[(&str, &str)]) -> EntityGraph<Firm, Amount> {
    let mut g = EntityGraph::new();
    for (from, to) in edges {
        g.add_relationship(from, to, Amount(1.0));
    }
    g
}

fn keys(g: &EntityGraph<Firm, Amount>) -> Vec<&str> {
    g.entities().map(|(_, f)| f.0.as_str()).collect()
}

fn residual_keys(g: &EntityGraph<Firm, Amount>, r: &ResidualGraph) -> Vec<String> {
    r.nodes().iter().map(|&idx| g.key_of(idx).to_string()).collect()
}

// ═══════════════════════════════════════════════════════════════════
// Entity graph
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_keys_resolve_to_single_entity() {
    let g = build(&[("A", "B"), ("B", "C"), ("A", "C")]);
    assert_eq!(g.entity_count(), 3);
    assert_eq!(g.relationship_count(), 3);
    assert_eq!(keys(&g), vec!["A", "B", "C"]);
    let a = g.get_node("A").unwrap();
    assert_eq!(g.out_degree(a), 2);
    assert_eq!(g.in_degree(a), 0);
}

#[test]
fn test_upsert_replaces_parallel_edge() {
    let mut g: EntityGraph<Firm, Amount> = EntityGraph::new();
    g.upsert_relationship("A", "B", Amount(1.0));
    g.upsert_relationship("A", "B", Amount(5.0));
    assert_eq!(g.relationship_count(), 1);
    let (_, _, amount) = g.relationships().next().unwrap();
    assert_eq!(amount.0, 5.0);

    g.add_relationship("A", "B", Amount(2.0));
    assert_eq!(g.relationship_count(), 2);
    let a = g.get_node("A").unwrap();
    assert_eq!(g.out_degree(a), 1);
}

// ═══════════════════════════════════════════════════════════════════
// Partitioning
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_partition_weak_components() {
    let g = build(&[("A", "B"), ("C", "D"), ("E", "B"), ("D", "F")]);
    let parts = GraphPartitioner::partition(g);
    assert_eq!(parts.len(), 2);
    assert_eq!(keys(&parts[0]), vec!["A", "B", "E"]);
    assert_eq!(keys(&parts[1]), vec!["C", "D", "F"]);
    assert_eq!(parts[0].relationship_count(), 2);
    assert_eq!(parts[1].relationship_count(), 2);
}

#[test]
fn test_partition_covers_every_linked_entity_once() {
    let mut g = build(&[("A", "B"), ("B", "C"), ("X", "Y"), ("Y", "X"), ("P", "Q")]);
    g.ensure_entity("LONE");
    let total_edges = g.relationship_count();
    let parts = GraphPartitioner::partition(g);

    let mut all: Vec<&str> = parts.iter().flat_map(keys).collect();
    all.sort_unstable();
    assert_eq!(all, vec!["A", "B", "C", "P", "Q", "X", "Y"]);
    assert_eq!(
        parts.iter().map(|p| p.relationship_count()).sum::<usize>(),
        total_edges
    );
    for part in &parts {
        for (_, firm) in part.entities() {
            assert!(part.get_node(&firm.0).is_some());
        }
    }
}

#[test]
fn test_partition_of_empty_graph() {
    let parts = GraphPartitioner::partition(EntityGraph::<Firm, Amount>::new());
    assert!(parts.is_empty());
}

// ═══════════════════════════════════════════════════════════════════
// Peeling
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_forward_peel_keeps_cycle_and_downstream() {
    let g = build(&[("S", "A"), ("A", "B"), ("B", "A"), ("B", "T")]);
    let r = ResidualGraph::from_graph(&g.graph).peel(PeelDirection::Forward);
    assert_eq!(residual_keys(&g, &r), vec!["A", "B", "T"]);
}

#[test]
fn test_reverse_peel_keeps_cycle_and_upstream() {
    let g = build(&[("S", "A"), ("A", "B"), ("B", "A"), ("B", "T")]);
    let r = ResidualGraph::from_graph(&g.graph).peel(PeelDirection::Reverse);
    assert_eq!(residual_keys(&g, &r), vec!["S", "A", "B"]);
}

#[test]
fn test_cycle_residual_is_core_only() {
    let g = build(&[("S", "A"), ("A", "B"), ("B", "C"), ("C", "A"), ("C", "T")]);
    let r = ResidualGraph::from_graph(&g.graph).cycle_residual();
    assert_eq!(residual_keys(&g, &r), vec!["A", "B", "C"]);
    assert_eq!(r.edge_count(), 3);
    let (a, t) = (g.get_node("A").unwrap(), g.get_node("T").unwrap());
    assert!(r.contains(a));
    assert!(!r.contains(t));
}

#[test]
fn test_cycle_residual_keeps_bridge_between_cycles() {
    let g = build(&[("A", "B"), ("B", "A"), ("B", "X"), ("X", "C"), ("C", "D"), ("D", "C")]);
    let r = ResidualGraph::from_graph(&g.graph).cycle_residual();
    assert_eq!(r.len(), 5);
    assert!(r.contains(g.get_node("X").unwrap()));

    let cycles = CycleEnumerator::new(&r).enumerate();
    assert!(cycles
        .iter()
        .all(|c| !c.members.contains(&g.get_node("X").unwrap())));
}

#[test]
fn test_acyclic_graph_peels_to_nothing() {
    let g = build(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
    assert!(ResidualGraph::from_graph(&g.graph).cycle_residual().is_empty());
}

// ═══════════════════════════════════════════════════════════════════
// Cycle recovery
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_cycles_in_path_order() {
    let g = build(&[("A", "B"), ("B", "C"), ("C", "A")]);
    let r = ResidualGraph::from_graph(&g.graph).cycle_residual();
    let cycles = CycleEnumerator::new(&r).enumerate();
    assert_eq!(cycles.len(), 1);
    let members: Vec<&str> = cycles[0].members.iter().map(|&i| g.key_of(i)).collect();
    assert_eq!(members, vec!["A", "B", "C"]);
    assert_eq!(cycles[0].kind, CycleKind::Circle);
}

#[test]
fn test_roots_order_the_traversal() {
    let g = build(&[("A", "B"), ("B", "A"), ("C", "D"), ("D", "E"), ("E", "C")]);
    let r = ResidualGraph::from_graph(&g.graph).cycle_residual();
    let c = g.get_node("C").unwrap();
    let cycles = CycleEnumerator::new(&r).enumerate_with_roots([c]);
    assert_eq!(cycles.len(), 2);
    assert_eq!(cycles[0].kind, CycleKind::Circle);
    assert_eq!(cycles[1].kind, CycleKind::Mutual);
}

#[test]
fn test_unknown_roots_ignored() {
    let g = build(&[("A", "B"), ("B", "A"), ("B", "T")]);
    let r = ResidualGraph::from_graph(&g.graph).cycle_residual();
    let t = g.get_node("T").unwrap();
    let cycles = CycleEnumerator::new(&r).enumerate_with_roots([t]);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].kind, CycleKind::Mutual);
}

// ═══════════════════════════════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_valid_subgraph_passes() {
    let g = build(&[("A", "B"), ("B", "C")]);
    assert!(validate_subgraph(0, &g).is_ok());
}

#[test]
fn test_negative_amount_rejected() {
    let mut g = build(&[("A", "B")]);
    g.add_relationship("B", "C", Amount(-3.0));
    match validate_subgraph(4, &g) {
        Err(GraphError::InvalidAmount { subgraph, from, to, .. }) => {
            assert_eq!(subgraph, 4);
            assert_eq!((from.as_str(), to.as_str()), ("B", "C"));
        }
        other => panic!("expected InvalidAmount, got {other:?}"),
    }
}

#[test]
fn test_nan_amount_and_self_loop_rejected() {
    let mut g = build(&[("A", "B")]);
    g.add_relationship("A", "C", Amount(f64::NAN));
    assert!(matches!(
        validate_subgraph(0, &g),
        Err(GraphError::InvalidAmount { .. })
    ));

    let mut looped = build(&[("A", "B")]);
    looped.add_relationship("B", "B", Amount(1.0));
    assert!(matches!(
        validate_subgraph(1, &looped),
        Err(GraphError::SelfLoop { subgraph: 1, .. })
    ));
}

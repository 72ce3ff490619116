//! Root resolution and cross-holding detection on control subgraphs.

use riskgraph_analysis::control::{ControlGraph, ControlLink, RootResolver};

fn holdings(edges: &[(&str, &str)]) -> ControlGraph {
    let mut g = ControlGraph::new();
    for (holder, held) in edges {
        g.upsert_relationship(holder, held, ControlLink::new("Holding", 30.0));
    }
    g
}

fn flags(g: &ControlGraph, id: &str) -> (bool, bool) {
    let e = g.get(id).unwrap();
    (e.is_root, e.is_cross_held)
}

#[test]
fn test_single_root_tree() {
    let mut g = holdings(&[("R", "A"), ("R", "B"), ("A", "C")]);
    let outcome = RootResolver::resolve(&mut g);
    assert_eq!(outcome.root, g.get_node("R"));
    assert_eq!(outcome.cross_held, 0);
    assert_eq!(flags(&g, "R"), (true, false));
    for id in ["A", "B", "C"] {
        assert_eq!(flags(&g, id), (false, false));
    }
}

#[test]
fn test_root_with_local_cross_holding() {
    let mut g = holdings(&[("R", "A"), ("A", "B"), ("B", "A"), ("B", "C")]);
    let outcome = RootResolver::resolve(&mut g);
    assert_eq!(outcome.root, g.get_node("R"));
    assert_eq!(flags(&g, "R"), (true, false));
    // Forward peel stops at the first cluster; its descendants survive too
    assert_eq!(flags(&g, "A"), (false, true));
    assert_eq!(flags(&g, "B"), (false, true));
    assert_eq!(flags(&g, "C"), (false, true));
    assert_eq!(outcome.cross_held, 3);
}

#[test]
fn test_first_root_in_insertion_order_wins() {
    let mut g = holdings(&[("P", "X"), ("Q", "X")]);
    let outcome = RootResolver::resolve(&mut g);
    assert_eq!(outcome.root, g.get_node("P"));
    assert!(g.get("P").unwrap().is_root);
    assert!(!g.get("Q").unwrap().is_root);
    assert_eq!(outcome.cross_held, 0);
}

#[test]
fn test_no_root_reverse_peel() {
    let mut g = holdings(&[("A", "B"), ("B", "A"), ("A", "C"), ("C", "D")]);
    let outcome = RootResolver::resolve(&mut g);
    assert_eq!(outcome.root, None);
    assert_eq!(outcome.cross_held, 2);
    assert_eq!(flags(&g, "A"), (false, true));
    assert_eq!(flags(&g, "B"), (false, true));
    assert_eq!(flags(&g, "C"), (false, false));
    assert_eq!(flags(&g, "D"), (false, false));
}

#[test]
fn test_link_rate_clamped_and_control_flag() {
    let link = ControlLink::new("Control", 140.0);
    assert_eq!(link.rate, 100.0);
    assert!(link.is_control());
    assert!(!ControlLink::new("Holding", 5.0).is_control());
}

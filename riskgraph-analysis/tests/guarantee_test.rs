//! Guarantee risk typing and exposure scoring.

use riskgraph_analysis::guarantee::{
    GuaranteeGraph, GuaranteeLink, GuaranteeRules, RiskClassifier, RiskQuantifier, RiskTag,
};
use riskgraph_core::config::WeightRange;

fn guarantees(edges: &[(&str, &str, f64)]) -> GuaranteeGraph {
    let mut g = GuaranteeGraph::new();
    for &(from, to, amount) in edges {
        g.upsert_relationship(from, to, GuaranteeLink::new(amount));
    }
    g
}

fn classify(edges: &[(&str, &str, f64)]) -> GuaranteeGraph {
    let mut g = guarantees(edges);
    RiskClassifier::default().classify(&mut g);
    g
}

fn tags(g: &GuaranteeGraph, id: &str) -> Vec<RiskTag> {
    g.get(id).unwrap().tags.as_slice().to_vec()
}

fn exposure(g: &GuaranteeGraph, id: &str) -> (f64, f64) {
    let e = g.get(id).unwrap();
    (e.exposure, e.weight)
}

// ═══════════════════════════════════════════════════════════════════
// Two-entity subgraphs
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_single_guarantee_is_normal() {
    let g = classify(&[("A", "B", 100.0)]);
    assert_eq!(tags(&g, "A"), vec![RiskTag::Normal]);
    assert_eq!(tags(&g, "B"), vec![RiskTag::Normal]);
}

#[test]
fn test_reciprocal_pair_is_mutual_not_circle() {
    let g = classify(&[("A", "B", 100.0), ("B", "A", 100.0)]);
    assert_eq!(tags(&g, "A"), vec![RiskTag::Mutual]);
    assert_eq!(tags(&g, "B"), vec![RiskTag::Mutual]);
}

// ═══════════════════════════════════════════════════════════════════
// Cycle roles
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_three_cycle_is_circle() {
    let g = classify(&[("A", "B", 10.0), ("B", "C", 10.0), ("C", "A", 10.0)]);
    for id in ["A", "B", "C"] {
        assert_eq!(tags(&g, id), vec![RiskTag::Circle], "entity {id}");
    }
}

#[test]
fn test_mutual_pair_with_pendant_branch() {
    let g = classify(&[("A", "B", 10.0), ("B", "A", 10.0), ("A", "C", 10.0)]);
    assert_eq!(tags(&g, "A"), vec![RiskTag::Mutual]);
    assert_eq!(tags(&g, "B"), vec![RiskTag::Mutual]);
    assert_eq!(tags(&g, "C"), vec![RiskTag::Chain]);
}

#[test]
fn test_unreachable_cycle_cluster_still_tagged() {
    // D's cycle is not reachable from A's, so the traversal must restart.
    let g = classify(&[
        ("A", "B", 1.0),
        ("B", "C", 1.0),
        ("C", "A", 1.0),
        ("D", "E", 1.0),
        ("E", "F", 1.0),
        ("F", "D", 1.0),
        ("D", "A", 1.0),
    ]);
    for id in ["A", "B", "C", "D", "E", "F"] {
        assert!(tags(&g, id).contains(&RiskTag::Circle), "entity {id}");
    }
}

#[test]
fn test_cycle_stats_reported() {
    let mut g = guarantees(&[
        ("A", "B", 1.0),
        ("B", "A", 1.0),
        ("B", "C", 1.0),
        ("C", "D", 1.0),
        ("D", "B", 1.0),
    ]);
    let stats = RiskClassifier::default().classify(&mut g);
    assert_eq!(stats.residual_size, 4);
    assert_eq!(stats.mutual_pairs, 1);
    assert!(stats.circles >= 1);
}

// ═══════════════════════════════════════════════════════════════════
// Degree roles
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_hub_is_cross_targets_are_not_focus() {
    let g = classify(&[("H", "X", 1.0), ("H", "Y", 1.0), ("H", "Z", 1.0)]);
    assert_eq!(tags(&g, "H"), vec![RiskTag::Cross]);
    for id in ["X", "Y", "Z"] {
        assert_eq!(tags(&g, id), vec![RiskTag::Chain], "entity {id}");
    }
}

#[test]
fn test_sink_is_focus() {
    let g = classify(&[("X", "T", 1.0), ("Y", "T", 1.0), ("Z", "T", 1.0)]);
    assert_eq!(tags(&g, "T"), vec![RiskTag::Focus]);
    assert_eq!(tags(&g, "X"), vec![RiskTag::Chain]);
}

#[test]
fn test_roles_accumulate_in_pass_order() {
    let g = classify(&[
        ("A", "B", 1.0),
        ("B", "C", 1.0),
        ("C", "A", 1.0),
        ("A", "D", 1.0),
        ("A", "E", 1.0),
    ]);
    assert_eq!(tags(&g, "A"), vec![RiskTag::Cross, RiskTag::Circle]);
    assert_eq!(tags(&g, "D"), vec![RiskTag::Chain]);
}

#[test]
fn test_custom_thresholds() {
    let mut g = guarantees(&[("H", "X", 1.0), ("H", "Y", 1.0), ("Z", "H", 1.0)]);
    let classifier = RiskClassifier::new(GuaranteeRules {
        hub_out_degree: 2,
        focus_in_degree: 5,
    });
    classifier.classify(&mut g);
    assert_eq!(tags(&g, "H"), vec![RiskTag::Cross]);
}

#[test]
fn test_plain_chain() {
    let g = classify(&[("A", "B", 1.0), ("B", "C", 1.0)]);
    for id in ["A", "B", "C"] {
        assert_eq!(tags(&g, id), vec![RiskTag::Chain]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Exposure
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_exposure_shares_and_weights() {
    let mut g = guarantees(&[("A", "B", 100.0), ("B", "C", 300.0)]);
    RiskQuantifier::new(WeightRange::new(5.0, 25.0, 15.0)).quantify(&mut g);

    let (m_a, w_a) = exposure(&g, "A");
    let (m_b, w_b) = exposure(&g, "B");
    let (m_c, w_c) = exposure(&g, "C");
    assert!((m_a - 0.25).abs() < 1e-9);
    assert!((m_b - 1.0).abs() < 1e-9);
    assert!((m_c - 0.75).abs() < 1e-9);
    assert!((w_a - 5.0).abs() < 1e-9);
    assert!((w_b - 25.0).abs() < 1e-9);
    assert!((w_c - (5.0 + 20.0 / 0.75 * 0.5)).abs() < 1e-9);
}

#[test]
fn test_uniform_exposure_gets_flat_weight() {
    let mut g = guarantees(&[("A", "B", 10.0), ("B", "C", 10.0), ("C", "A", 10.0)]);
    RiskQuantifier::new(WeightRange::new(5.0, 25.0, 15.0)).quantify(&mut g);
    for id in ["A", "B", "C"] {
        assert_eq!(exposure(&g, id).1, 15.0);
    }
}

#[test]
fn test_reciprocal_pair_counts_once_with_later_amount() {
    let mut g = guarantees(&[("A", "B", 100.0), ("B", "A", 300.0), ("B", "C", 100.0)]);
    RiskQuantifier::new(WeightRange::new(5.0, 25.0, 15.0)).quantify(&mut g);
    assert!((exposure(&g, "A").0 - 0.75).abs() < 1e-9);
    assert!((exposure(&g, "B").0 - 1.0).abs() < 1e-9);
    assert!((exposure(&g, "C").0 - 0.25).abs() < 1e-9);
}

#[test]
fn test_quantify_is_idempotent() {
    let mut g = guarantees(&[("A", "B", 7.0), ("B", "C", 3.0), ("C", "D", 9.0)]);
    let q = RiskQuantifier::new(WeightRange::new(5.0, 25.0, 15.0));
    q.quantify(&mut g);
    let first: Vec<_> = g.entities().map(|(_, e)| (e.exposure, e.weight)).collect();
    q.quantify(&mut g);
    let second: Vec<_> = g.entities().map(|(_, e)| (e.exposure, e.weight)).collect();
    assert_eq!(first, second);
}

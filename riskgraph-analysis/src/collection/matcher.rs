//! Shell-enterprise triad matching: loan in, near-identical transfer out.

use petgraph::graph::NodeIndex;
use riskgraph_core::config::CollectionConfig;
use riskgraph_core::constants;

use super::types::{CollectionGraph, FlowKind, Transaction};

/// Temporal and amount tolerances for a triad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchRules {
    /// Transfer must follow the loan within this many days.
    pub max_day_gap: u32,
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            max_day_gap: constants::DEFAULT_MAX_DAY_GAP,
            min_ratio: constants::DEFAULT_MIN_RATIO,
            max_ratio: constants::DEFAULT_MAX_RATIO,
        }
    }
}

impl MatchRules {
    pub fn from_config(config: &CollectionConfig) -> Self {
        Self {
            max_day_gap: config.effective_max_day_gap(),
            min_ratio: config.effective_min_ratio(),
            max_ratio: config.effective_max_ratio(),
        }
    }

    /// Transfer/loan ratio if `transfer` qualifies against `loan`.
    pub fn ratio(&self, loan: &Transaction, transfer: &Transaction) -> Option<f64> {
        if transfer.day < loan.day || transfer.day - loan.day > self.max_day_gap {
            return None;
        }
        if loan.amount <= 0.0 {
            return None;
        }
        let ratio = transfer.amount / loan.amount;
        (self.min_ratio..=self.max_ratio)
            .contains(&ratio)
            .then_some(ratio)
    }
}

/// An outgoing transfer considered for a loan.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub recipient: NodeIndex,
    pub transfer: &'a Transaction,
}

/// Best transfer for `loan` among `candidates`: highest qualifying ratio,
/// earliest candidate on ties. A transfer back to the lender still counts.
pub fn best_match<'a>(
    loan: &Transaction,
    candidates: &[Candidate<'a>],
    rules: &MatchRules,
) -> Option<(Candidate<'a>, f64)> {
    let mut best: Option<(Candidate<'a>, f64)> = None;
    for candidate in candidates {
        if candidate.transfer.kind != FlowKind::Transfer {
            continue;
        }
        let Some(ratio) = rules.ratio(loan, candidate.transfer) else {
            continue;
        };
        if best.as_ref().map_or(true, |(_, r)| ratio > *r) {
            best = Some((*candidate, ratio));
        }
    }
    best
}

/// A confirmed loan → pass-through → transfer pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Triad {
    pub origin: String,
    pub pass_through: String,
    pub recipient: String,
    pub loan: Transaction,
    pub transfer: Transaction,
    pub ratio: f64,
}

/// Finds triads in a fund-collection subgraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellEnterpriseMatcher {
    rules: MatchRules,
}

impl ShellEnterpriseMatcher {
    pub fn new(rules: MatchRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    /// One triad per incoming loan that has a qualifying onward transfer.
    ///
    /// Candidate lists are snapshotted in relationship insertion order before
    /// matching, so the result depends only on the graph contents.
    pub fn find_triads(&self, graph: &CollectionGraph) -> Vec<Triad> {
        let count = graph.entity_count();
        let mut loans_in: Vec<Vec<(NodeIndex, &Transaction)>> = vec![Vec::new(); count];
        let mut transfers_out: Vec<Vec<Candidate<'_>>> = vec![Vec::new(); count];
        for (from, to, tx) in graph.relationships() {
            match tx.kind {
                FlowKind::Loan => loans_in[to.index()].push((from, tx)),
                FlowKind::Transfer => transfers_out[from.index()].push(Candidate {
                    recipient: to,
                    transfer: tx,
                }),
            }
        }

        let mut triads = Vec::new();
        for (node, _) in graph.entities() {
            let loans = &loans_in[node.index()];
            let candidates = &transfers_out[node.index()];
            if loans.is_empty() || candidates.is_empty() {
                continue;
            }
            for &(origin, loan) in loans {
                if let Some((hit, ratio)) = best_match(loan, candidates, &self.rules) {
                    triads.push(Triad {
                        origin: graph.key_of(origin).to_string(),
                        pass_through: graph.key_of(node).to_string(),
                        recipient: graph.key_of(hit.recipient).to_string(),
                        loan: loan.clone(),
                        transfer: hit.transfer.clone(),
                        ratio,
                    });
                }
            }
        }
        triads
    }
}

//! Derived laundering-pattern graph built from confirmed triads.

use riskgraph_core::types::collections::{FxHashSet, SmallVec3};
use serde::{Deserialize, Serialize};

use super::matcher::Triad;
use super::types::Transaction;
use crate::graph::{EntityGraph, Keyed};

/// Position of an account within a triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternRole {
    /// Lender the loan came from.
    Origin,
    /// Account that received the loan and passed it on.
    PassThrough,
    /// Final recipient of the onward transfer.
    Recipient,
}

impl PatternRole {
    /// Display class: `start`, `mid`, or `end`.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Origin => "start",
            Self::PassThrough => "mid",
            Self::Recipient => "end",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::PassThrough => 2,
            Self::Recipient => 1,
            Self::Origin => 0,
        }
    }
}

/// An account in the pattern graph with every role it plays.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternEntity {
    pub id: String,
    pub roles: SmallVec3<PatternRole>,
}

impl PatternEntity {
    pub fn add_role(&mut self, role: PatternRole) {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
    }

    pub fn has_role(&self, role: PatternRole) -> bool {
        self.roles.contains(&role)
    }

    /// Most specific role: pass-through, then recipient, then origin.
    pub fn display_role(&self) -> Option<PatternRole> {
        self.roles.iter().copied().max_by_key(PatternRole::precedence)
    }
}

impl Keyed for PatternEntity {
    fn key(&self) -> &str {
        &self.id
    }

    fn from_key(key: &str) -> Self {
        Self {
            id: key.to_string(),
            roles: SmallVec3::new(),
        }
    }
}

pub type PatternGraph = EntityGraph<PatternEntity, Transaction>;

/// Build the pattern graph: each triad contributes its loan and transfer
/// relationships and tags its three accounts.
pub fn build_pattern_graph(triads: &[Triad]) -> PatternGraph {
    let mut graph = PatternGraph::new();
    for triad in triads {
        graph.add_relationship(&triad.origin, &triad.pass_through, triad.loan.clone());
        graph.add_relationship(&triad.pass_through, &triad.recipient, triad.transfer.clone());
        for (id, role) in [
            (&triad.origin, PatternRole::Origin),
            (&triad.pass_through, PatternRole::PassThrough),
            (&triad.recipient, PatternRole::Recipient),
        ] {
            let idx = graph.ensure_entity(id);
            graph.entity_mut(idx).add_role(role);
        }
    }
    graph
}

/// Ids of pattern accounts grouped by role (origins, pass-throughs,
/// recipients), each group de-duplicated in first-seen order. An account
/// playing several roles appears once per role.
pub fn role_listing(graph: &PatternGraph) -> Vec<String> {
    let mut out = Vec::new();
    for role in [
        PatternRole::Origin,
        PatternRole::PassThrough,
        PatternRole::Recipient,
    ] {
        let mut seen = FxHashSet::default();
        for (_, entity) in graph.entities() {
            if entity.has_role(role) && seen.insert(entity.id.as_str()) {
                out.push(entity.id.clone());
            }
        }
    }
    out
}

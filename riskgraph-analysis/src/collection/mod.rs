//! Fund-collection analysis: shell-enterprise triads, the derived pattern
//! graph, and per-account net inflow.

pub mod matcher;
pub mod net_flow;
pub mod pattern;
pub mod types;

pub use matcher::{best_match, Candidate, MatchRules, ShellEnterpriseMatcher, Triad};
pub use net_flow::NetFlowAnalyzer;
pub use pattern::{build_pattern_graph, role_listing, PatternEntity, PatternGraph, PatternRole};
pub use types::{Account, CollectionGraph, FlowKind, Transaction};

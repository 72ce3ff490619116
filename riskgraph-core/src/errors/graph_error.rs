//! Graph validation errors.

use super::error_code::{self, RiskErrorCode};

/// Reasons a subgraph is rejected before classification.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Subgraph {subgraph}: relationship {from} -> {to} has invalid amount {amount}")]
    InvalidAmount {
        subgraph: usize,
        from: String,
        to: String,
        amount: f64,
    },

    #[error("Subgraph {subgraph}: self-loop on {entity}")]
    SelfLoop { subgraph: usize, entity: String },
}

impl RiskErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_GRAPH
    }
}

//! Accounts and dated transactions.

use riskgraph_core::constants::LINK_WIDTH_DIVISOR;
use serde::{Deserialize, Serialize};

use crate::graph::{EntityGraph, Keyed, Weighted};

/// Loan disbursement or onward transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowKind {
    Loan,
    Transfer,
}

/// One transaction row. Parallel transactions between the same accounts
/// stay separate relationships.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub amount: f64,
    /// Integer date stamp at day granularity (e.g. `20200912` or `12`).
    pub day: u32,
    pub kind: FlowKind,
    /// Transaction code from the source table.
    pub code: String,
}

impl Transaction {
    pub fn loan(amount: f64, day: u32) -> Self {
        Self {
            amount,
            day,
            kind: FlowKind::Loan,
            code: String::new(),
        }
    }

    pub fn transfer(amount: f64, day: u32) -> Self {
        Self {
            amount,
            day,
            kind: FlowKind::Transfer,
            code: String::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Display width, √amount / 1800.
    pub fn width(&self) -> f64 {
        self.amount.max(0.0).sqrt() / LINK_WIDTH_DIVISOR
    }
}

impl Weighted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// A bank account (normalized id).
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    /// Incoming loans minus outgoing transfers.
    pub net_inflow: f64,
    /// |net_inflow| rescaled to the visual-weight range.
    pub weight: f64,
}

impl Keyed for Account {
    fn key(&self) -> &str {
        &self.id
    }

    fn from_key(key: &str) -> Self {
        Self {
            id: key.to_string(),
            net_inflow: 0.0,
            weight: 0.0,
        }
    }
}

pub type CollectionGraph = EntityGraph<Account, Transaction>;

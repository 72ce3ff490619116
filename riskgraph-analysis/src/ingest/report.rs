//! Ingestion counters and non-fatal row errors.

use riskgraph_core::errors::IngestError;
use riskgraph_core::types::collections::FxHashMap;

/// Why a row was not loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    EmptyId,
    ZeroAmount,
    SelfLoop,
    /// Failed the code, flag, status, or amount filters.
    Filtered,
    /// Loan abstract matched a repayment/interest phrase.
    ExcludedAbstract,
    /// A field could not be parsed; see `errors`.
    Malformed,
}

/// Per-file ingestion summary.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub rows_read: u64,
    pub rows_accepted: u64,
    pub skipped: FxHashMap<SkipReason, u64>,
    pub errors: Vec<IngestError>,
}

impl IngestReport {
    pub fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    pub fn reject(&mut self, error: IngestError) {
        self.skip(SkipReason::Malformed);
        self.errors.push(error);
    }

    pub fn skipped_for(&self, reason: SkipReason) -> u64 {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn rows_skipped(&self) -> u64 {
        self.skipped.values().sum()
    }
}

/// A loaded graph plus how it was loaded.
#[derive(Debug)]
pub struct Ingested<G> {
    pub graph: G,
    pub report: IngestReport,
}

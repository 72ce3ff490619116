//! RiskEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing pipeline progress.
///
/// Handlers only override the events they care about. `Send + Sync` is
/// required because the pipeline owns the dispatcher across worker threads.
pub trait RiskEventHandler: Send + Sync {
    fn on_dataset_started(&self, _event: &DatasetStartedEvent) {}
    fn on_subgraph_rejected(&self, _event: &SubgraphRejectedEvent) {}
    fn on_triad_confirmed(&self, _event: &TriadConfirmedEvent) {}
    fn on_dataset_complete(&self, _event: &DatasetCompleteEvent) {}
}

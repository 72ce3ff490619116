//! EventDispatcher: synchronous event dispatch, free when no handler is registered.

use std::sync::Arc;

use super::handler::RiskEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn RiskEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn RiskEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not stop later handlers from receiving the event.
    fn emit<F: Fn(&dyn RiskEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    pub fn emit_dataset_started(&self, event: &DatasetStartedEvent) {
        self.emit(|h| h.on_dataset_started(event));
    }

    pub fn emit_subgraph_rejected(&self, event: &SubgraphRejectedEvent) {
        self.emit(|h| h.on_subgraph_rejected(event));
    }

    pub fn emit_triad_confirmed(&self, event: &TriadConfirmedEvent) {
        self.emit(|h| h.on_triad_confirmed(event));
    }

    pub fn emit_dataset_complete(&self, event: &DatasetCompleteEvent) {
        self.emit(|h| h.on_dataset_complete(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

//! Event payload types.

/// Which relationship table a pipeline run is processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Guarantee,
    Collection,
    Control,
}

impl Dataset {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Guarantee => "guarantee",
            Self::Collection => "collection",
            Self::Control => "control",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload for `on_dataset_started`.
#[derive(Debug, Clone)]
pub struct DatasetStartedEvent {
    pub dataset: Dataset,
    pub entity_count: usize,
    pub relationship_count: usize,
    pub subgraph_count: usize,
}

/// Payload for `on_subgraph_rejected`.
#[derive(Debug, Clone)]
pub struct SubgraphRejectedEvent {
    pub dataset: Dataset,
    pub subgraph_id: usize,
    pub message: String,
}

/// Payload for `on_triad_confirmed`.
#[derive(Debug, Clone)]
pub struct TriadConfirmedEvent {
    pub origin: String,
    pub pass_through: String,
    pub recipient: String,
    pub ratio: f64,
}

/// Payload for `on_dataset_complete`.
#[derive(Debug, Clone)]
pub struct DatasetCompleteEvent {
    pub dataset: Dataset,
    pub processed: usize,
    pub rejected: usize,
    pub duration_ms: u64,
}

//! Graph layer shared by every dataset: keyed entity arena, weak-component
//! partitioning, topological peeling, and DFS cycle recovery.

pub mod cycles;
pub mod partition;
pub mod peel;
pub mod types;
pub mod validate;

pub use cycles::{CycleEnumerator, CycleKind, DetectedCycle};
pub use partition::GraphPartitioner;
pub use peel::{PeelDirection, ResidualGraph};
pub use types::{EntityGraph, Keyed, Weighted};
pub use validate::validate_subgraph;

//! Data structures shared by every riskgraph subsystem.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet};

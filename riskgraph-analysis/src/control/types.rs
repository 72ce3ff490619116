//! Control entities and holding links.

use crate::graph::{EntityGraph, Keyed, Weighted};

/// Relationship type marking the source as a controlling party.
pub const CONTROL_RELATION: &str = "Control";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlEntity {
    pub id: String,
    /// No one holds this entity; it ultimately controls its subgraph.
    pub is_root: bool,
    /// Part of a cross-holding cluster that no peel can resolve.
    pub is_cross_held: bool,
    /// Source of at least one `Control` relationship.
    pub is_controller: bool,
}

impl Keyed for ControlEntity {
    fn key(&self) -> &str {
        &self.id
    }

    fn from_key(key: &str) -> Self {
        Self {
            id: key.to_string(),
            ..Default::default()
        }
    }
}

/// A holding of `rate` percent.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlLink {
    pub rel_tag: String,
    pub rel_type: String,
    /// Holding percentage, clamped to 100.
    pub rate: f64,
}

impl ControlLink {
    pub fn new(rel_type: impl Into<String>, rate: f64) -> Self {
        Self {
            rel_tag: String::new(),
            rel_type: rel_type.into(),
            rate: rate.min(100.0),
        }
    }

    pub fn is_control(&self) -> bool {
        self.rel_type == CONTROL_RELATION
    }
}

impl Weighted for ControlLink {
    fn amount(&self) -> f64 {
        self.rate
    }
}

pub type ControlGraph = EntityGraph<ControlEntity, ControlLink>;

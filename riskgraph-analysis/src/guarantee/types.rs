//! Guarantee entities, links, and risk tags.

use std::fmt;

use riskgraph_core::types::collections::SmallVec4;
use serde::{Deserialize, Serialize};

use crate::graph::{EntityGraph, Keyed, Weighted};

/// Risk role of an entity in a guarantee subgraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTag {
    /// Lone guarantor/guaranteed pair, no risk.
    Normal,
    /// Guarantees many others (fan-out hub).
    Cross,
    /// Guaranteed by many others (concentration sink).
    Focus,
    /// Guarantees a party that guarantees it back.
    Mutual,
    /// Member of a guarantee cycle of three or more.
    Circle,
    /// Plain link in a chain; assigned only when nothing else applies.
    Chain,
}

impl RiskTag {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Cross => "Cross",
            Self::Focus => "Focus",
            Self::Mutual => "Mutual",
            Self::Circle => "Circle",
            Self::Chain => "Chain",
        }
    }

    /// True for the tags that flag a subgraph as risky.
    pub fn is_risk(&self) -> bool {
        matches!(self, Self::Cross | Self::Focus | Self::Mutual | Self::Circle)
    }
}

impl fmt::Display for RiskTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered, duplicate-free tag set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskTags(SmallVec4<RiskTag>);

impl RiskTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `tag` unless present. Returns whether it was added.
    pub fn insert(&mut self, tag: RiskTag) -> bool {
        if self.0.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    pub fn contains(&self, tag: RiskTag) -> bool {
        self.0.contains(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = RiskTag> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[RiskTag] {
        &self.0
    }

    /// Comma-joined display names, e.g. `"Cross, Mutual"`.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(RiskTag::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A company in the guarantee network.
#[derive(Debug, Clone, PartialEq)]
pub struct GuaranteeEntity {
    pub id: String,
    pub tags: RiskTags,
    /// Share of subgraph guarantee volume on incident relationships.
    pub exposure: f64,
    /// Exposure rescaled to the visual-weight range.
    pub weight: f64,
}

impl Keyed for GuaranteeEntity {
    fn key(&self) -> &str {
        &self.id
    }

    fn from_key(key: &str) -> Self {
        Self {
            id: key.to_string(),
            tags: RiskTags::new(),
            exposure: 0.0,
            weight: 0.0,
        }
    }
}

/// A guarantee from source to destination.
#[derive(Debug, Clone, PartialEq)]
pub struct GuaranteeLink {
    /// Guarantee type as declared in the source table.
    pub declared_type: String,
    /// Free-form time column from the source table.
    pub time: String,
    pub amount: f64,
}

impl GuaranteeLink {
    pub fn new(amount: f64) -> Self {
        Self {
            declared_type: String::new(),
            time: String::new(),
            amount,
        }
    }
}

impl Weighted for GuaranteeLink {
    fn amount(&self) -> f64 {
        self.amount
    }
}

pub type GuaranteeGraph = EntityGraph<GuaranteeEntity, GuaranteeLink>;

//! Fund-collection (shell-enterprise) matching configuration.

use serde::{Deserialize, Serialize};

use super::WeightRange;
use crate::constants;

/// Rules for loan → pass-through → transfer triad matching and net-flow scaling.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CollectionConfig {
    /// Maximum days between loan and onward transfer. Default: 5.
    pub max_day_gap: Option<u32>,
    /// Minimum transfer/loan amount ratio. Default: 0.9.
    pub min_ratio: Option<f64>,
    /// Maximum transfer/loan amount ratio. Default: 1.0.
    pub max_ratio: Option<f64>,
    /// Lower bound of the net-flow weight range. Default: 5.0.
    pub weight_min: Option<f64>,
    /// Upper bound of the net-flow weight range. Default: 14.0.
    pub weight_max: Option<f64>,
    /// Weight used when all net flows in a subgraph are equal. Default: 9.0.
    pub weight_flat: Option<f64>,
}

impl CollectionConfig {
    /// Returns the effective day window, defaulting to 5.
    pub fn effective_max_day_gap(&self) -> u32 {
        self.max_day_gap.unwrap_or(constants::DEFAULT_MAX_DAY_GAP)
    }

    /// Returns the effective minimum ratio, defaulting to 0.9.
    pub fn effective_min_ratio(&self) -> f64 {
        self.min_ratio.unwrap_or(constants::DEFAULT_MIN_RATIO)
    }

    /// Returns the effective maximum ratio, defaulting to 1.0.
    pub fn effective_max_ratio(&self) -> f64 {
        self.max_ratio.unwrap_or(constants::DEFAULT_MAX_RATIO)
    }

    /// Returns the effective net-flow weight range, defaulting to [5, 14] flat 9.
    pub fn effective_weight_range(&self) -> WeightRange {
        WeightRange::new(
            self.weight_min.unwrap_or(constants::DEFAULT_NET_FLOW_WEIGHT_MIN),
            self.weight_max.unwrap_or(constants::DEFAULT_NET_FLOW_WEIGHT_MAX),
            self.weight_flat.unwrap_or(constants::DEFAULT_NET_FLOW_WEIGHT_FLAT),
        )
    }
}

//! Guarantee-network classification configuration.

use serde::{Deserialize, Serialize};

use super::WeightRange;
use crate::constants;

/// Rules for guarantee risk typing and exposure scaling.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GuaranteeConfig {
    /// Out-degree at which a guarantor is tagged a hub. Default: 3.
    pub hub_out_degree: Option<usize>,
    /// In-degree at which a guaranteed entity is tagged a sink. Default: 3.
    pub focus_in_degree: Option<usize>,
    /// Lower bound of the exposure weight range. Default: 5.0.
    pub weight_min: Option<f64>,
    /// Upper bound of the exposure weight range. Default: 25.0.
    pub weight_max: Option<f64>,
    /// Weight used when all exposures in a subgraph are equal. Default: 15.0.
    pub weight_flat: Option<f64>,
}

impl GuaranteeConfig {
    /// Returns the effective hub threshold, defaulting to 3.
    pub fn effective_hub_out_degree(&self) -> usize {
        self.hub_out_degree.unwrap_or(constants::DEFAULT_HUB_OUT_DEGREE)
    }

    /// Returns the effective sink threshold, defaulting to 3.
    pub fn effective_focus_in_degree(&self) -> usize {
        self.focus_in_degree.unwrap_or(constants::DEFAULT_FOCUS_IN_DEGREE)
    }

    /// Returns the effective exposure weight range, defaulting to [5, 25] flat 15.
    pub fn effective_weight_range(&self) -> WeightRange {
        WeightRange::new(
            self.weight_min.unwrap_or(constants::DEFAULT_EXPOSURE_WEIGHT_MIN),
            self.weight_max.unwrap_or(constants::DEFAULT_EXPOSURE_WEIGHT_MAX),
            self.weight_flat.unwrap_or(constants::DEFAULT_EXPOSURE_WEIGHT_FLAT),
        )
    }
}

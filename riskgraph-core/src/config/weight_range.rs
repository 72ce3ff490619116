//! Visual-weight target range shared by exposure and net-flow scaling.

use serde::{Deserialize, Serialize};

/// Linear target range for rescaled scores.
///
/// When every input in a subgraph is identical the rescaler cannot divide
/// by the spread, so every entity gets `flat` instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
    pub flat: f64,
}

impl WeightRange {
    pub const fn new(min: f64, max: f64, flat: f64) -> Self {
        Self { min, max, flat }
    }

    /// Width of the target range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when `min <= flat <= max` and all bounds are finite.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.flat.is_finite()
            && self.min <= self.max
            && (self.min..=self.max).contains(&self.flat)
    }
}

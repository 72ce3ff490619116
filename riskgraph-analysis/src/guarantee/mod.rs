//! Guarantee-network risk typing and exposure scoring.

pub mod classifier;
pub mod quantifier;
pub mod types;

pub use classifier::{ClassificationStats, GuaranteeRules, RiskClassifier};
pub use quantifier::RiskQuantifier;
pub use types::{GuaranteeEntity, GuaranteeGraph, GuaranteeLink, RiskTag, RiskTags};

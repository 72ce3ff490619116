//! Equity-control root resolution.

pub mod roots;
pub mod types;

pub use roots::{RootOutcome, RootResolver};
pub use types::{ControlEntity, ControlGraph, ControlLink};

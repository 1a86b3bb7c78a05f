//! Shared data structures for diabetes risk screening
//!
//! - `MeasurementSet`: the four clinical inputs of one evaluation
//! - `RiskAssessment`: score, triggered factors and tier produced by the engine
//! - `RecommendationBundle`: advice text keyed by severity

mod measurement;
mod assessment;
mod recommendation;

pub use measurement::*;
pub use assessment::*;
pub use recommendation::*;

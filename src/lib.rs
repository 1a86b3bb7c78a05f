//! DiabetesCheck: rule-based diabetes risk screening
//!
//! Scores four clinical measurements against a fixed rule table and resolves
//! a recommendation for the resulting severity.
//!
//! ## Architecture
//!
//! - **Engine**: pure scorer and recommendation resolver, no validation, no state
//! - **Intake**: caller-side validation applied before the engine is invoked
//! - **Report**: text rendering adapter (banner, factors, advice, comparison chart)
//! - **API**: axum HTTP adapter around intake + engine
//! - **Config**: TOML configuration for the adapters

pub mod config;
pub mod types;
pub mod engine;
pub mod intake;
pub mod report;
pub mod api;

// Re-export configuration
pub use config::AppConfig;

// Re-export commonly used types
pub use types::{
    MeasurementSet, RecommendationBundle, RiskAssessment, RiskFactor, RiskTier, RuleGroup,
    SeverityClass,
};

// Re-export engine entry points
pub use engine::{classify, evaluate, evaluate_batch, recommend, screen, Screening};

// Re-export intake
pub use intake::{IntakeError, RawMeasurements};

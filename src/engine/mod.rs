//! Rule-based scoring engine
//!
//! Two pure functions joined by a plain record:
//!
//! - [`evaluate`]: four measurements → [`RiskAssessment`]
//! - [`recommend`]: [`SeverityClass`] → [`RecommendationBundle`]
//!
//! The engine does no input validation and holds no state, so it can be
//! called from any number of threads at once.

pub mod rules;
mod scorer;
mod recommendation;

pub use recommendation::recommend;
pub use rules::{RuleSet, ThresholdRule, TierBreakpoint, MAX_SCORE, RULE_TABLE, TIER_BREAKPOINTS};
pub use scorer::{classify, evaluate, evaluate_batch, evaluate_values};

use serde::Serialize;

use crate::types::{
    MeasurementSet, RecommendationBundle, RiskAssessment, RiskFactor, RiskTier, SeverityClass,
};

/// Request/response shape of one screening: assessment plus advice.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Screening {
    pub score: u32,
    pub factors: Vec<RiskFactor>,
    pub tier: RiskTier,
    pub severity: SeverityClass,
    pub message: &'static str,
    pub recommendation: RecommendationBundle,
}

impl From<RiskAssessment> for Screening {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            recommendation: recommend(assessment.severity),
            score: assessment.score,
            factors: assessment.factors,
            tier: assessment.tier,
            severity: assessment.severity,
            message: assessment.tier_message,
        }
    }
}

/// Evaluate and resolve advice in one call.
pub fn screen(measurements: &MeasurementSet) -> Screening {
    Screening::from(evaluate(measurements))
}

/// Rule table and breakpoints, for display.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RuleTable {
    pub groups: &'static [RuleSet],
    pub tiers: &'static [TierBreakpoint],
    pub max_score: u32,
}

pub const fn rule_table() -> RuleTable {
    RuleTable {
        groups: &RULE_TABLE,
        tiers: &TIER_BREAKPOINTS,
        max_score: MAX_SCORE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_scenario_a() {
        let s = screen(&MeasurementSet::new(210.0, 36.0, 70, 210.0));
        assert_eq!(s.score, 105);
        assert_eq!(s.tier, RiskTier::VeryHigh);
        assert_eq!(s.factors.len(), 4);
        assert_eq!(s.message, "Seek a doctor immediately");
        assert_eq!(s.recommendation.severity, SeverityClass::High);
    }

    #[test]
    fn test_screening_json_shape() {
        let s = screen(&MeasurementSet::new(130.0, 31.0, 50, 60.0));
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["score"], 75);
        assert_eq!(v["tier"], "high");
        assert_eq!(v["severity"], "high");
        assert_eq!(v["factors"][0], "high glucose (126–199 mg/dL)");
        assert_eq!(v["recommendation"]["heading"], "Urgent recommendations");
    }
}

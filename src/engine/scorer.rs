//! Risk scorer: measurements → score, factors, tier.
//!
//! Deterministic and total. Every finite input produces a result; values
//! below a group's lowest threshold (including zero, negatives and NaN) add
//! nothing.

use rayon::prelude::*;
use tracing::debug;

use super::rules::{RuleSet, RULE_TABLE, TIER_BREAKPOINTS};
use crate::types::{MeasurementSet, RiskAssessment, RiskFactor, RiskTier};

/// Evaluate one measurement set against the rule table.
///
/// Groups are scored in glucose, bmi, age, insulin order and each adds the
/// points of its highest matching rule only.
pub fn evaluate(measurements: &MeasurementSet) -> RiskAssessment {
    let mut score = 0;
    let mut factors = Vec::with_capacity(RULE_TABLE.len());

    for set in &RULE_TABLE {
        if let Some(factor) = score_group(set, measurements.value_of(set.group)) {
            score += factor.points;
            factors.push(factor);
        }
    }

    let tier = classify(score);
    debug!(
        score,
        tier = tier.label(),
        factors = factors.len(),
        "Risk evaluation complete"
    );

    RiskAssessment::new(score, factors, tier)
}

/// Convenience form of [`evaluate`] taking the four values directly.
pub fn evaluate_values(glucose: f64, bmi: f64, age: i32, insulin: f64) -> RiskAssessment {
    evaluate(&MeasurementSet::new(glucose, bmi, age, insulin))
}

/// Evaluate independent measurement sets in parallel.
///
/// Output order matches input order.
pub fn evaluate_batch(sets: &[MeasurementSet]) -> Vec<RiskAssessment> {
    sets.par_iter().map(evaluate).collect()
}

/// Map a total score to its tier using the breakpoint table.
pub fn classify(score: u32) -> RiskTier {
    TIER_BREAKPOINTS
        .iter()
        .find(|b| score >= b.min_score)
        .map_or(RiskTier::Low, |b| b.tier)
}

fn score_group(set: &RuleSet, value: f64) -> Option<RiskFactor> {
    set.rules
        .iter()
        .find(|rule| value >= rule.threshold)
        .map(|rule| RiskFactor {
            group: set.group,
            points: rule.points,
            description: rule.description,
        })
}

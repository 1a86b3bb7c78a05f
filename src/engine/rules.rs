//! Rule tables for the risk scorer.
//!
//! Each group lists its thresholds highest first. The scorer takes the first
//! rule whose threshold the measurement reaches, so a group contributes at
//! most one rule. Reference rows in [`crate::report::comparison`] read their
//! values from here.

use serde::Serialize;

use crate::types::{RiskTier, RuleGroup};

/// A single `value >= threshold` rule.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ThresholdRule {
    pub threshold: f64,
    pub points: u32,
    pub description: &'static str,
}

/// All rules of one group, highest threshold first.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RuleSet {
    pub group: RuleGroup,
    pub rules: &'static [ThresholdRule],
}

impl RuleSet {
    /// Points of the top rule, i.e. the most this group can add.
    pub fn max_points(&self) -> u32 {
        self.rules.first().map_or(0, |r| r.points)
    }

    /// Threshold of the lowest rule; values below it contribute nothing.
    pub fn floor(&self) -> f64 {
        self.rules.last().map_or(f64::INFINITY, |r| r.threshold)
    }
}

pub const GLUCOSE_RULES: &[ThresholdRule] = &[
    ThresholdRule { threshold: 200.0, points: 40, description: "very high glucose (≥200 mg/dL)" },
    ThresholdRule { threshold: 126.0, points: 30, description: "high glucose (126–199 mg/dL)" },
    ThresholdRule { threshold: 100.0, points: 15, description: "borderline glucose (100–125 mg/dL)" },
];

pub const BMI_RULES: &[ThresholdRule] = &[
    ThresholdRule { threshold: 35.0, points: 25, description: "very high BMI (≥35)" },
    ThresholdRule { threshold: 30.0, points: 20, description: "high BMI (30–34.9)" },
    ThresholdRule { threshold: 25.0, points: 10, description: "elevated BMI (25–29.9)" },
];

pub const AGE_RULES: &[ThresholdRule] = &[
    ThresholdRule { threshold: 65.0, points: 20, description: "advanced age (≥65)" },
    ThresholdRule { threshold: 45.0, points: 15, description: "middle age (45–64)" },
    ThresholdRule { threshold: 35.0, points: 10, description: "adult age (35–44)" },
];

pub const INSULIN_RULES: &[ThresholdRule] = &[
    ThresholdRule { threshold: 200.0, points: 20, description: "very high insulin (≥200 μIU/mL)" },
    ThresholdRule { threshold: 100.0, points: 15, description: "high insulin (100–199 μIU/mL)" },
    ThresholdRule { threshold: 50.0, points: 10, description: "borderline insulin (50–99 μIU/mL)" },
];

/// Rule groups in evaluation order.
pub const RULE_TABLE: [RuleSet; 4] = [
    RuleSet { group: RuleGroup::Glucose, rules: GLUCOSE_RULES },
    RuleSet { group: RuleGroup::Bmi, rules: BMI_RULES },
    RuleSet { group: RuleGroup::Age, rules: AGE_RULES },
    RuleSet { group: RuleGroup::Insulin, rules: INSULIN_RULES },
];

/// Highest reachable score: the top rule of every group.
pub const MAX_SCORE: u32 = 105;

/// Lower score bound of a tier.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TierBreakpoint {
    pub min_score: u32,
    pub tier: RiskTier,
}

/// Tier breakpoints, highest first. The last entry catches every score.
pub const TIER_BREAKPOINTS: [TierBreakpoint; 5] = [
    TierBreakpoint { min_score: 80, tier: RiskTier::VeryHigh },
    TierBreakpoint { min_score: 60, tier: RiskTier::High },
    TierBreakpoint { min_score: 40, tier: RiskTier::Medium },
    TierBreakpoint { min_score: 20, tier: RiskTier::LowMedium },
    TierBreakpoint { min_score: 0, tier: RiskTier::Low },
];

/// Rules for one group.
pub fn rules_for(group: RuleGroup) -> &'static [ThresholdRule] {
    match group {
        RuleGroup::Glucose => GLUCOSE_RULES,
        RuleGroup::Bmi => BMI_RULES,
        RuleGroup::Age => AGE_RULES,
        RuleGroup::Insulin => INSULIN_RULES,
    }
}

/// Threshold of the rule in `group` that awards `points`.
///
/// Used by the reference rows so they cannot drift from the scoring table.
pub fn threshold_for(group: RuleGroup, points: u32) -> Option<f64> {
    rules_for(group)
        .iter()
        .find(|r| r.points == points)
        .map(|r| r.threshold)
}

//! Scoring Engine Property Tests
//!
//! Exercises the public engine API over grids of inputs: bounds, per-group
//! exclusivity, monotonicity, factor ordering, and the reference scenarios.

use diabetes_check::engine::{self, rules, MAX_SCORE};
use diabetes_check::report::{HIGH_LIMITS, NORMAL_LIMITS};
use diabetes_check::{evaluate, MeasurementSet, RiskTier, RuleGroup, SeverityClass};

const GLUCOSE_GRID: [f64; 9] = [0.0, 50.0, 99.9, 100.0, 125.0, 126.0, 199.9, 200.0, 450.0];
const BMI_GRID: [f64; 8] = [0.0, 18.0, 24.9, 25.0, 29.9, 30.0, 35.0, 60.0];
const AGE_GRID: [i32; 8] = [0, 20, 34, 35, 44, 45, 65, 110];
const INSULIN_GRID: [f64; 8] = [0.0, 25.0, 49.9, 50.0, 99.0, 100.0, 200.0, 800.0];

fn all_sets() -> Vec<MeasurementSet> {
    let mut out = Vec::new();
    for &g in &GLUCOSE_GRID {
        for &b in &BMI_GRID {
            for &a in &AGE_GRID {
                for &i in &INSULIN_GRID {
                    out.push(MeasurementSet::new(g, b, a, i));
                }
            }
        }
    }
    out
}

#[test]
fn top_thresholds_give_maximum_score() {
    for (g, b, a, i) in [(200.0, 35.0, 65, 200.0), (500.0, 99.0, 120, 900.0)] {
        let result = evaluate(&MeasurementSet::new(g, b, a, i));
        assert_eq!(result.score, 105);
        assert_eq!(result.tier, RiskTier::VeryHigh);
    }
}

#[test]
fn all_zero_gives_empty_low() {
    let result = evaluate(&MeasurementSet::new(0.0, 0.0, 0, 0.0));
    assert_eq!(result.score, 0);
    assert!(result.factors.is_empty());
    assert_eq!(result.tier, RiskTier::Low);
    assert_eq!(result.severity, SeverityClass::Low);
}

#[test]
fn scenario_a_very_high() {
    let result = evaluate(&MeasurementSet::new(210.0, 36.0, 70, 210.0));
    assert_eq!(result.score, 105);
    assert_eq!(result.tier, RiskTier::VeryHigh);
    assert_eq!(result.factors.len(), 4);
}

#[test]
fn scenario_b_low() {
    let result = evaluate(&MeasurementSet::new(110.0, 22.0, 30, 10.0));
    assert_eq!(result.score, 15);
    assert_eq!(result.tier, RiskTier::Low);
    assert_eq!(result.factors.len(), 1);
    assert_eq!(result.factors[0].group, RuleGroup::Glucose);
}

#[test]
fn scenario_c_high() {
    let result = evaluate(&MeasurementSet::new(130.0, 31.0, 50, 60.0));
    assert_eq!(result.score, 75);
    assert_eq!(result.tier, RiskTier::High);
    assert_eq!(result.tier_label, "high");
    assert_eq!(result.tier_message, "Further testing recommended");
}

#[test]
fn score_is_sum_of_factor_points_and_bounded() {
    for m in all_sets() {
        let result = evaluate(&m);
        let sum: u32 = result.factors.iter().map(|f| f.points).sum();
        assert_eq!(result.score, sum, "{m:?}");
        assert!(result.score <= MAX_SCORE);
        assert_eq!(result.factors.is_empty(), result.score == 0, "{m:?}");
    }
}

#[test]
fn one_factor_per_group_in_evaluation_order() {
    for m in all_sets() {
        let groups: Vec<RuleGroup> = evaluate(&m).factors.iter().map(|f| f.group).collect();
        let positions: Vec<usize> = groups
            .iter()
            .map(|g| RuleGroup::ALL.iter().position(|x| x == g).unwrap())
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "factors out of order or duplicated for {m:?}: {groups:?}"
        );
    }
}

#[test]
fn each_group_awards_only_highest_matching_rule() {
    for set in &rules::RULE_TABLE {
        for rule in set.rules {
            let mut m = MeasurementSet::new(0.0, 0.0, 0, 0.0);
            match set.group {
                RuleGroup::Glucose => m.glucose = rule.threshold,
                RuleGroup::Bmi => m.bmi = rule.threshold,
                RuleGroup::Age => m.age = rule.threshold as i32,
                RuleGroup::Insulin => m.insulin = rule.threshold,
            }
            let result = evaluate(&m);
            assert_eq!(result.score, rule.points, "{} at {}", set.group, rule.threshold);
            assert_eq!(result.factors[0].description, rule.description);
        }
    }
}

#[test]
fn increasing_any_input_never_lowers_score() {
    for m in all_sets() {
        let base = evaluate(&m).score;
        let bumped = [
            MeasurementSet { glucose: m.glucose + 30.0, ..m },
            MeasurementSet { bmi: m.bmi + 5.0, ..m },
            MeasurementSet { age: m.age + 10, ..m },
            MeasurementSet { insulin: m.insulin + 60.0, ..m },
        ];
        for b in bumped {
            assert!(evaluate(&b).score >= base, "{m:?} -> {b:?}");
        }
    }
}

#[test]
fn tier_never_decreases_with_score() {
    let mut previous = RiskTier::Low;
    for score in 0..=MAX_SCORE {
        let tier = engine::classify(score);
        assert!(tier >= previous, "tier dropped at score {score}");
        previous = tier;
    }
}

#[test]
fn evaluation_is_idempotent() {
    for m in all_sets().into_iter().step_by(37) {
        assert_eq!(evaluate(&m), evaluate(&m));
    }
}

#[test]
fn batch_matches_individual_evaluation() {
    let sets = all_sets();
    let batch = engine::evaluate_batch(&sets);
    assert_eq!(batch.len(), sets.len());
    for (m, result) in sets.iter().zip(&batch) {
        assert_eq!(&evaluate(m), result);
    }
}

#[test]
fn negative_inputs_are_scored_not_rejected() {
    let result = evaluate(&MeasurementSet::new(-50.0, -3.0, -1, -0.5));
    assert_eq!(result.score, 0);
    assert_eq!(result.tier, RiskTier::Low);
}

#[test]
fn reference_rows_agree_with_rule_table() {
    // Values at the normal limit trigger the lowest band; the high limit triggers the "high" band
    let at_normal = evaluate(&MeasurementSet::new(NORMAL_LIMITS.glucose, NORMAL_LIMITS.bmi, 0, 0.0));
    let points: Vec<u32> = at_normal.factors.iter().map(|f| f.points).collect();
    assert_eq!(points, [15, 10]);

    let at_high = evaluate(&MeasurementSet::new(
        HIGH_LIMITS.glucose,
        HIGH_LIMITS.bmi,
        HIGH_LIMITS.age as i32,
        HIGH_LIMITS.insulin,
    ));
    let points: Vec<u32> = at_high.factors.iter().map(|f| f.points).collect();
    assert_eq!(points, [30, 20, 20, 15]);
}

#[test]
fn severity_drives_recommendation() {
    for tier in RiskTier::ALL {
        let bundle = engine::recommend(tier.severity());
        assert_eq!(bundle.severity, tier.severity());
        assert!(!bundle.actions.is_empty());
    }
}

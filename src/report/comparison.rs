//! Grouped bar comparison of the inputs against reference limits.
//!
//! The "normal" and "high" rows are read from the rule table so the chart
//! and the scorer always agree. Insulin's normal limit is the clinical upper
//! reference (24.9 rounded up), which has no scoring rule of its own.

use serde::Serialize;

use crate::engine::rules::{AGE_RULES, BMI_RULES, GLUCOSE_RULES, INSULIN_RULES};
use crate::types::{MeasurementSet, RuleGroup};

/// Upper end of the normal fasting insulin range (μIU/mL).
pub const INSULIN_NORMAL_LIMIT: f64 = 25.0;

/// One reference row of the chart.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ReferenceRow {
    pub label: &'static str,
    pub glucose: f64,
    pub bmi: f64,
    pub insulin: f64,
    pub age: f64,
}

impl ReferenceRow {
    pub fn value_of(&self, group: RuleGroup) -> f64 {
        match group {
            RuleGroup::Glucose => self.glucose,
            RuleGroup::Bmi => self.bmi,
            RuleGroup::Age => self.age,
            RuleGroup::Insulin => self.insulin,
        }
    }
}

/// Where the lowest-scoring rule of each group begins.
pub const NORMAL_LIMITS: ReferenceRow = ReferenceRow {
    label: "Normal limit",
    glucose: GLUCOSE_RULES[2].threshold,
    bmi: BMI_RULES[2].threshold,
    insulin: INSULIN_NORMAL_LIMIT,
    age: 0.0,
};

/// Where the "high" rule of each group begins; for age, the oldest band.
pub const HIGH_LIMITS: ReferenceRow = ReferenceRow {
    label: "High limit",
    glucose: GLUCOSE_RULES[1].threshold,
    bmi: BMI_RULES[1].threshold,
    insulin: INSULIN_RULES[1].threshold,
    age: AGE_RULES[0].threshold,
};

/// Parameters in chart order.
pub const CHART_ORDER: [RuleGroup; 4] = [
    RuleGroup::Glucose,
    RuleGroup::Bmi,
    RuleGroup::Insulin,
    RuleGroup::Age,
];

/// Values of one parameter across the three chart series.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ComparisonEntry {
    pub parameter: RuleGroup,
    pub value: f64,
    pub normal: f64,
    pub high: f64,
}

/// Build chart data for a measurement set.
pub fn compare(measurements: &MeasurementSet) -> Vec<ComparisonEntry> {
    CHART_ORDER
        .iter()
        .map(|&group| ComparisonEntry {
            parameter: group,
            value: measurements.value_of(group),
            normal: NORMAL_LIMITS.value_of(group),
            high: HIGH_LIMITS.value_of(group),
        })
        .collect()
}

/// Render the comparison as grouped horizontal bars.
///
/// Each parameter is scaled to its own largest value, since the units differ.
pub fn render_chart(entries: &[ComparisonEntry], bar_width: usize) -> String {
    let mut out = String::new();
    out.push_str("Comparison with reference values\n");

    for entry in entries {
        out.push_str(&format!("\n{} ({})\n", entry.parameter, entry.parameter.unit()));
        let scale = entry.value.max(entry.normal).max(entry.high);
        for (label, value) in [
            ("Your value", entry.value),
            (NORMAL_LIMITS.label, entry.normal),
            (HIGH_LIMITS.label, entry.high),
        ] {
            let bar = "█".repeat(bar_len(value, scale, bar_width));
            out.push_str(&format!("  {label:<12} {bar} {value:.1}\n"));
        }
    }
    out
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar_len(value: f64, scale: f64, width: usize) -> usize {
    if !(value > 0.0 && scale > 0.0) {
        return 0;
    }
    let len = (value / scale * width as f64).round();
    (len as usize).min(width)
}

//! Text rendering adapter
//!
//! Turns a [`Screening`] into terminal output. Severity only selects the
//! banner style here; nothing in this module feeds back into scoring.

pub mod comparison;
mod guide;

pub use comparison::{compare, render_chart, ComparisonEntry, ReferenceRow, HIGH_LIMITS, NORMAL_LIMITS};
pub use guide::{input_guide, render_guide, GuideEntry};

use crate::config::ReportConfig;
use crate::engine::{RuleTable, Screening};
use crate::types::{MeasurementSet, RecommendationBundle, SeverityClass};

/// Banner frame character for a severity class.
pub const fn banner_rule(severity: SeverityClass) -> char {
    match severity {
        SeverityClass::High => '#',
        SeverityClass::Medium => '=',
        SeverityClass::Low => '-',
    }
}

/// Full text report: banner, factors, advice and optional comparison.
pub fn render(measurements: &MeasurementSet, screening: &Screening, config: &ReportConfig) -> String {
    let mut out = String::new();

    let rule: String = std::iter::repeat(banner_rule(screening.severity))
        .take(48)
        .collect();
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        "  {}  (score {}/{})\n",
        screening.tier,
        screening.score,
        crate::engine::MAX_SCORE
    ));
    out.push_str(&format!("  {}\n", screening.message));
    out.push_str(&format!("{rule}\n"));

    if !screening.factors.is_empty() {
        out.push_str("\nRisk factors identified\n");
        for factor in &screening.factors {
            out.push_str(&format!("  - {} (+{})\n", factor.description, factor.points));
        }
    }

    out.push('\n');
    out.push_str(&render_recommendation(&screening.recommendation));

    if config.show_comparison {
        out.push('\n');
        out.push_str(&render_chart(&compare(measurements), config.bar_width));
    }

    out
}

pub fn render_recommendation(bundle: &RecommendationBundle) -> String {
    let mut out = format!("{}\n", bundle.heading);
    for action in bundle.actions {
        out.push_str(&format!("  - {action}\n"));
    }
    out
}

/// Single-line summary, used by batch output.
pub fn summary_line(index: usize, screening: &Screening) -> String {
    format!(
        "#{index:<4} score {:>3}  {:<10}  {}",
        screening.score,
        screening.tier.label(),
        screening
            .factors
            .iter()
            .map(|f| f.description)
            .collect::<Vec<_>>()
            .join("; ")
    )
}

/// The scoring rule table as aligned text.
pub fn render_rules(table: &RuleTable) -> String {
    let mut out = String::from("Scoring rules (first matching threshold per group wins)\n");
    for set in table.groups {
        out.push_str(&format!("\n{} ({})\n", set.group, set.group.unit()));
        for rule in set.rules {
            out.push_str(&format!(
                "  >= {:>6.1}  +{:<3} {}\n",
                rule.threshold, rule.points, rule.description
            ));
        }
    }
    out.push_str(&format!("\nTiers (maximum score {})\n", table.max_score));
    for bp in table.tiers {
        out.push_str(&format!(
            "  >= {:>3}  {:<10} {:<6}  {}\n",
            bp.min_score,
            bp.tier.label(),
            bp.tier.severity().as_str(),
            bp.tier.message()
        ));
    }
    out
}

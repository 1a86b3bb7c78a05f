//! Config validation beyond what serde checks.
//!
//! - Unknown keys: the raw document is walked as a `toml::Value` and every
//!   path not in [`known_config_keys`] becomes a warning, with the nearest
//!   known key as a suggestion.
//! - Clinical ranges: intake bounds are compared with the scoring rule table.
//!
//! Unknown keys only warn; an existing file keeps loading.

use std::collections::HashSet;

use crate::engine::rules;
use crate::types::RuleGroup;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for AppConfig.
///
/// Must be kept in step with the structs in app_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [server]
        "server",
        "server.addr",
        // [intake]
        "intake",
        "intake.require_positive",
        "intake.glucose_max",
        "intake.bmi_max",
        "intake.age_max",
        "intake.insulin_max",
        // [report]
        "report",
        "report.show_comparison",
        "report.bar_width",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// Key Collection
// ============================================================================

/// Dotted paths of every key in a parsed config document, sections included.
///
/// `[intake]` with `age_max = 120` yields `intake` and `intake.age_max`.
/// Nested tables (none are valid today) are descended as well so a stray
/// `[intake.limits]` block is still reported.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    collect_keys(value, prefix, &mut keys);
    keys
}

fn collect_keys(value: &toml::Value, prefix: &str, out: &mut Vec<String>) {
    let Some(table) = value.as_table() else {
        return;
    };
    for (name, child) in table {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        collect_keys(child, &path, out);
        out.push(path);
    }
}

// ============================================================================
// Typo Suggestions
// ============================================================================

/// Edit distance over chars, so unit symbols like `μ` count as one edit.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitute = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

/// Largest edit distance still offered as a "did you mean".
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Closest known key to a misspelt one, e.g. `intake.glucoze_max`.
///
/// Equal distances resolve to the alphabetically first key.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|&(dist, _)| dist <= MAX_SUGGESTION_DISTANCE)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Warnings for keys `AppConfig` does not know about.
///
/// Serde ignores such keys, so a misspelt bound would silently fall back to
/// its default. Returns nothing for a document that does not parse; that
/// error is reported by the typed load.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            message: format!("Unknown config key '{key}'"),
            suggestion: suggest_correction(&key, &known),
            field: key,
        })
        .collect()
}

// ============================================================================
// Clinical Range Validation
// ============================================================================

/// Validate intake bounds against the scoring rule table.
///
/// Returns (errors, warnings): errors are values that must prevent startup;
/// warnings are suspicious but not fatal.
pub fn validate_clinical_ranges(
    config: &super::AppConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let age_max = config.intake.age_max;
    if age_max.is_finite() && age_max.fract() != 0.0 {
        errors.push(format!(
            "intake.age_max = {age_max} must be a whole number of years"
        ));
    }
    if age_max > f64::from(i32::MAX) {
        errors.push(format!(
            "intake.age_max = {age_max} exceeds the largest representable age ({})",
            i32::MAX
        ));
    }

    for set in &rules::RULE_TABLE {
        let field = set.group.field_name();
        let max = config.intake.max_for(set.group);
        let Some(top) = set.rules.first() else {
            continue;
        };

        // A bound below the top threshold makes that rule unreachable
        if max.is_finite() && max > 0.0 && max < top.threshold {
            warnings.push(ValidationWarning {
                field: format!("intake.{field}_max"),
                message: format!(
                    "intake.{field}_max = {max} is below the top {} threshold ({}), \
                     '{}' can never trigger",
                    set.group, top.threshold, top.description
                ),
                suggestion: None,
            });
        }

        let suggested = suggested_max(set.group);
        if max.is_finite() && max > suggested * 2.0 {
            warnings.push(ValidationWarning {
                field: format!("intake.{field}_max"),
                message: format!(
                    "intake.{field}_max = {max} is far above the suggested bound ({suggested})"
                ),
                suggestion: None,
            });
        }
    }

    (errors, warnings)
}

const fn suggested_max(group: RuleGroup) -> f64 {
    match group {
        RuleGroup::Glucose => super::defaults::GLUCOSE_MAX,
        RuleGroup::Bmi => super::defaults::BMI_MAX,
        RuleGroup::Age => super::defaults::AGE_MAX,
        RuleGroup::Insulin => super::defaults::INSULIN_MAX,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("glucoze_max", "glucose_max"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_levenshtein_multibyte() {
        assert_eq!(levenshtein("μIU", "uIU"), 1);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [intake]
            glucose_max = 500.0
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"intake".to_string()));
        assert!(keys.contains(&"intake.glucose_max".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[intake]
insulin_mx = 800.0
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "intake.insulin_mx");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("intake.insulin_max"));
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_low_bound_warns_unreachable_rule() {
        let mut config = crate::config::AppConfig::default();
        config.intake.glucose_max = 150.0;
        let (errors, warnings) = validate_clinical_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "intake.glucose_max"));
    }

    #[test]
    fn test_fractional_age_max_is_error() {
        let mut config = crate::config::AppConfig::default();
        config.intake.age_max = 99.5;
        let (errors, _) = validate_clinical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("age_max")));
    }

    #[test]
    fn test_defaults_clean() {
        let config = crate::config::AppConfig::default();
        let (errors, warnings) = validate_clinical_ranges(&config);
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty(), "{warnings:?}");
    }
}

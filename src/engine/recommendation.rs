//! Recommendation resolver: severity → advice bundle.

use crate::types::{RecommendationBundle, SeverityClass};

const URGENT: RecommendationBundle = RecommendationBundle {
    severity: SeverityClass::High,
    heading: "Urgent recommendations",
    actions: &[
        "Consult an endocrinologist",
        "Get an HbA1c test and an oral glucose tolerance test",
        "Evaluate diabetes complications (eyes, kidneys, heart)",
        "Medication may be required",
    ],
};

const PREVENTIVE: RecommendationBundle = RecommendationBundle {
    severity: SeverityClass::Medium,
    heading: "Preventive recommendations",
    actions: &[
        "Eat a balanced diet and cut down on simple carbohydrates",
        "Exercise regularly, at least 150 minutes per week",
        "Lose weight if overweight",
        "Have a routine check-up every 6 months",
    ],
};

const MAINTENANCE: RecommendationBundle = RecommendationBundle {
    severity: SeverityClass::Low,
    heading: "Maintenance recommendations",
    actions: &[
        "Keep up a healthy diet",
        "Stay physically active",
        "Monitor your levels once a year",
        "Look after your mental health and manage stress",
    ],
};

/// Advice bundle for a severity class.
pub const fn recommend(severity: SeverityClass) -> RecommendationBundle {
    match severity {
        SeverityClass::High => URGENT,
        SeverityClass::Medium => PREVENTIVE,
        SeverityClass::Low => MAINTENANCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_matches_severity() {
        for severity in SeverityClass::ALL {
            assert_eq!(recommend(severity).severity, severity);
        }
    }

    #[test]
    fn test_bundles_are_distinct() {
        assert_ne!(recommend(SeverityClass::High), recommend(SeverityClass::Low));
        assert_eq!(recommend(SeverityClass::High).heading, "Urgent recommendations");
        assert_eq!(recommend(SeverityClass::Medium).actions.len(), 4);
    }
}

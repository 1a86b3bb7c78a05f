//! Measurement input: MeasurementSet, RuleGroup

use serde::{Deserialize, Serialize};

/// The four clinical measurements a single screening is based on.
///
/// Built fresh for each evaluation and never mutated. The engine accepts any
/// values here, including zero and negatives; range policy belongs to
/// [`crate::intake`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSet {
    /// Fasting plasma glucose (mg/dL)
    pub glucose: f64,
    /// Body-mass index (kg/m²)
    pub bmi: f64,
    /// Age in whole years
    pub age: i32,
    /// Serum insulin (μIU/mL)
    pub insulin: f64,
}

impl MeasurementSet {
    pub const fn new(glucose: f64, bmi: f64, age: i32, insulin: f64) -> Self {
        Self {
            glucose,
            bmi,
            age,
            insulin,
        }
    }

    /// Value of one rule group's measurement, widened to `f64`.
    pub fn value_of(&self, group: RuleGroup) -> f64 {
        match group {
            RuleGroup::Glucose => self.glucose,
            RuleGroup::Bmi => self.bmi,
            RuleGroup::Age => f64::from(self.age),
            RuleGroup::Insulin => self.insulin,
        }
    }
}

/// One of the four independent rule groups, in evaluation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
    Glucose,
    Bmi,
    Age,
    Insulin,
}

impl RuleGroup {
    /// All groups in the order the scorer evaluates them.
    pub const ALL: [Self; 4] = [Self::Glucose, Self::Bmi, Self::Age, Self::Insulin];

    /// Measurement unit shown next to values in reports.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Glucose => "mg/dL",
            Self::Bmi => "kg/m²",
            Self::Age => "years",
            Self::Insulin => "μIU/mL",
        }
    }

    /// Field name as it appears in requests and config keys.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Glucose => "glucose",
            Self::Bmi => "bmi",
            Self::Age => "age",
            Self::Insulin => "insulin",
        }
    }
}

impl std::fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleGroup::Glucose => write!(f, "Glucose"),
            RuleGroup::Bmi => write!(f, "BMI"),
            RuleGroup::Age => write!(f, "Age"),
            RuleGroup::Insulin => write!(f, "Insulin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_of_widens_age() {
        let m = MeasurementSet::new(110.0, 22.5, 30, 10.0);
        assert_eq!(m.value_of(RuleGroup::Age), 30.0);
        assert_eq!(m.value_of(RuleGroup::Bmi), 22.5);
    }

    #[test]
    fn test_group_order() {
        let names: Vec<_> = RuleGroup::ALL.iter().map(|g| g.field_name()).collect();
        assert_eq!(names, ["glucose", "bmi", "age", "insulin"]);
    }
}

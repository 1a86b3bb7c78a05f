//! Input intake policy
//!
//! The scoring engine accepts any numbers. This module is the caller-side
//! gate that turns raw form or request input into a [`MeasurementSet`]:
//!
//! - every field must be present and finite
//! - values must lie within `0..=max` for their field
//! - with `require_positive` (the default), zero counts as not filled in
//! - age must be a whole number of years
//!
//! Rejected input never reaches the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::IntakeConfig;
use crate::types::{MeasurementSet, RuleGroup};

/// Message shown when a field is missing or not positive.
pub const INCOMPLETE_MESSAGE: &str = "please complete all input fields";

/// Rejections at the presentation boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntakeError {
    #[error("please complete all input fields ({field} is missing or not positive)")]
    Incomplete { field: &'static str },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} = {value} is outside the accepted range ({min}-{max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("age must be a whole number of years, got {value}")]
    FractionalAge { value: f64 },
}

impl IntakeError {
    /// Name of the offending field.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Incomplete { field } | Self::NotFinite { field } | Self::OutOfRange { field, .. } => {
                field
            }
            Self::FractionalAge { .. } => "age",
        }
    }
}

/// Unvalidated input as collected from a form, CLI or request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMeasurements {
    #[serde(default)]
    pub glucose: Option<f64>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub insulin: Option<f64>,
}

impl RawMeasurements {
    pub const fn complete(glucose: f64, bmi: f64, age: f64, insulin: f64) -> Self {
        Self {
            glucose: Some(glucose),
            bmi: Some(bmi),
            age: Some(age),
            insulin: Some(insulin),
        }
    }

    const fn get(&self, group: RuleGroup) -> Option<f64> {
        match group {
            RuleGroup::Glucose => self.glucose,
            RuleGroup::Bmi => self.bmi,
            RuleGroup::Age => self.age,
            RuleGroup::Insulin => self.insulin,
        }
    }
}

/// Validate raw input against the intake policy.
///
/// Fields are checked in glucose, bmi, age, insulin order and the first
/// failure is returned.
pub fn validate(raw: &RawMeasurements, policy: &IntakeConfig) -> Result<MeasurementSet, IntakeError> {
    let mut values = [0.0_f64; 4];
    for (slot, group) in values.iter_mut().zip(RuleGroup::ALL) {
        *slot = check_field(group, raw.get(group), policy)?;
    }
    let [glucose, bmi, age, insulin] = values;

    if age.fract() != 0.0 {
        return Err(IntakeError::FractionalAge { value: age });
    }

    let measurements = MeasurementSet::new(glucose, bmi, whole_years(age)?, insulin);
    debug!(?measurements, "Intake accepted");
    Ok(measurements)
}

fn check_field(group: RuleGroup, value: Option<f64>, policy: &IntakeConfig) -> Result<f64, IntakeError> {
    let field = group.field_name();
    let value = value.ok_or(IntakeError::Incomplete { field })?;

    if !value.is_finite() {
        return Err(IntakeError::NotFinite { field });
    }
    if policy.require_positive && value <= 0.0 {
        return Err(IntakeError::Incomplete { field });
    }

    let max = policy.max_for(group);
    if !(0.0..=max).contains(&value) {
        return Err(IntakeError::OutOfRange {
            field,
            value,
            min: 0.0,
            max,
        });
    }
    Ok(value)
}

// `age` is finite, non-negative and whole at this point.
#[allow(clippy::cast_possible_truncation)]
fn whole_years(age: f64) -> Result<i32, IntakeError> {
    let max = f64::from(i32::MAX);
    if age > max {
        return Err(IntakeError::OutOfRange {
            field: RuleGroup::Age.field_name(),
            value: age,
            min: 0.0,
            max,
        });
    }
    Ok(age as i32)
}

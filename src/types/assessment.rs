//! Assessment output types: RiskFactor, RiskTier, SeverityClass, RiskAssessment

use serde::{Deserialize, Serialize};

use super::RuleGroup;

/// A triggered threshold rule.
///
/// Serializes as its description string, which is what callers display.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(into = "String")]
pub struct RiskFactor {
    /// Rule group the factor came from
    pub group: RuleGroup,
    /// Points this factor added to the score
    pub points: u32,
    /// Human-readable rule description
    pub description: &'static str,
}

impl From<RiskFactor> for String {
    fn from(factor: RiskFactor) -> Self {
        factor.description.to_string()
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// Coarse grouping of [`RiskTier`] that selects styling and advice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SeverityClass {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl SeverityClass {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for SeverityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown severity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity class '{0}' (expected high, medium or low)")]
pub struct UnknownSeverity(pub String);

impl std::str::FromStr for SeverityClass {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

/// Ordered risk classification derived from the score breakpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum RiskTier {
    Low = 0,
    LowMedium = 1,
    Medium = 2,
    High = 3,
    VeryHigh = 4,
}

impl RiskTier {
    /// Tiers from most to least severe.
    pub const ALL: [Self; 5] = [
        Self::VeryHigh,
        Self::High,
        Self::Medium,
        Self::LowMedium,
        Self::Low,
    ];

    /// Machine label, e.g. `"low-medium"`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "very-high",
            Self::High => "high",
            Self::Medium => "medium",
            Self::LowMedium => "low-medium",
            Self::Low => "low",
        }
    }

    /// One-line advice shown under the tier banner.
    pub const fn message(self) -> &'static str {
        match self {
            Self::VeryHigh => "Seek a doctor immediately",
            Self::High => "Further testing recommended",
            Self::Medium => "Watch lifestyle and diet",
            Self::LowMedium => "Maintain a healthy routine",
            Self::Low => "Condition good, maintain healthy lifestyle",
        }
    }

    pub const fn severity(self) -> SeverityClass {
        match self {
            Self::VeryHigh | Self::High => SeverityClass::High,
            Self::Medium | Self::LowMedium => SeverityClass::Medium,
            Self::Low => SeverityClass::Low,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::VeryHigh => write!(f, "VERY HIGH RISK"),
            RiskTier::High => write!(f, "HIGH RISK"),
            RiskTier::Medium => write!(f, "MEDIUM RISK"),
            RiskTier::LowMedium => write!(f, "LOW-MEDIUM RISK"),
            RiskTier::Low => write!(f, "LOW RISK"),
        }
    }
}

/// Result of one evaluation: the record passed from scoring to rendering.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RiskAssessment {
    /// Sum of per-group contributions (0-105)
    pub score: u32,
    /// Triggered rules in glucose, bmi, age, insulin order
    pub factors: Vec<RiskFactor>,
    pub tier: RiskTier,
    pub severity: SeverityClass,
    pub tier_label: &'static str,
    pub tier_message: &'static str,
}

impl RiskAssessment {
    /// Build an assessment from a score and its factors; tier fields derive from `tier`.
    pub fn new(score: u32, factors: Vec<RiskFactor>, tier: RiskTier) -> Self {
        Self {
            score,
            factors,
            tier,
            severity: tier.severity(),
            tier_label: tier.label(),
            tier_message: tier.message(),
        }
    }

    pub fn factor_descriptions(&self) -> Vec<&'static str> {
        self.factors.iter().map(|f| f.description).collect()
    }
}

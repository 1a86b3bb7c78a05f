//! Recommendation bundle type

use serde::Serialize;

use super::SeverityClass;

/// Static advisory text selected by [`SeverityClass`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RecommendationBundle {
    pub severity: SeverityClass,
    /// Section heading, e.g. "Urgent recommendations"
    pub heading: &'static str,
    /// Action items in display order
    pub actions: &'static [&'static str],
}

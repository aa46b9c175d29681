//! Risk status classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores at or above this are high risk.
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;

/// Scores at or above this (and below the high threshold) are moderate risk.
pub const MODERATE_RISK_THRESHOLD: f64 = 30.0;

/// Risk band derived from a 0–100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskStatus {
    #[serde(rename = "LOW RISK")]
    Low,
    #[serde(rename = "MODERATE RISK")]
    Moderate,
    #[serde(rename = "HIGH RISK")]
    High,
}

impl RiskStatus {
    /// The one rule mapping a raw score to a status.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            Self::High
        } else if score >= MODERATE_RISK_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Full label, e.g. "HIGH RISK".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW RISK",
            Self::Moderate => "MODERATE RISK",
            Self::High => "HIGH RISK",
        }
    }

    /// Badge label without the "RISK" suffix.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_at_the_lower_bound() {
        assert_eq!(RiskStatus::from_score(69.0), RiskStatus::Moderate);
        assert_eq!(RiskStatus::from_score(70.0), RiskStatus::High);
        assert_eq!(RiskStatus::from_score(29.0), RiskStatus::Low);
        assert_eq!(RiskStatus::from_score(30.0), RiskStatus::Moderate);
    }

    #[test]
    fn extremes_classify() {
        assert_eq!(RiskStatus::from_score(0.0), RiskStatus::Low);
        assert_eq!(RiskStatus::from_score(100.0), RiskStatus::High);
        assert_eq!(RiskStatus::from_score(29.99), RiskStatus::Low);
    }

    #[test]
    fn status_serializes_as_display_label() {
        assert_eq!(serde_json::to_string(&RiskStatus::High).unwrap(), "\"HIGH RISK\"");
        assert_eq!(RiskStatus::Moderate.to_string(), "MODERATE RISK");
        assert_eq!(RiskStatus::Low.short_label(), "LOW");
    }
}

//! Feature values as transmitted to the prediction service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized feature value.
///
/// Categorical codes and whole-number measurements are kept as integers so
/// they serialize as `1` rather than `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Decimal(f64),
}

impl FeatureValue {
    /// Creates a value from a measured quantity, collapsing whole numbers to integers.
    ///
    /// Returns `None` for NaN or infinite input.
    pub fn from_measurement(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Some(Self::Integer(value as i64))
        } else {
            Some(Self::Decimal(value))
        }
    }

    /// Returns the value as a float.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Integer(v) => *v as f64,
            Self::Decimal(v) => *v,
        }
    }

    /// Returns the value as an integer code if it is whole.
    pub fn as_code(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Decimal(v) if v.fract() == 0.0 => Some(*v as i64),
            Self::Decimal(_) => None,
        }
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_measurements_become_integers() {
        assert_eq!(FeatureValue::from_measurement(45.0), Some(FeatureValue::Integer(45)));
        assert_eq!(FeatureValue::from_measurement(24.69), Some(FeatureValue::Decimal(24.69)));
    }

    #[test]
    fn non_finite_measurements_are_rejected() {
        assert_eq!(FeatureValue::from_measurement(f64::NAN), None);
        assert_eq!(FeatureValue::from_measurement(f64::INFINITY), None);
    }

    #[test]
    fn values_serialize_without_tags() {
        assert_eq!(serde_json::to_string(&FeatureValue::Integer(2)).unwrap(), "2");
        assert_eq!(serde_json::to_string(&FeatureValue::Decimal(6.8)).unwrap(), "6.8");
    }

    #[test]
    fn as_code_only_accepts_whole_numbers() {
        assert_eq!(FeatureValue::Decimal(3.0).as_code(), Some(3));
        assert_eq!(FeatureValue::Decimal(3.5).as_code(), None);
    }
}

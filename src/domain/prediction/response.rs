//! Prediction-service response types.
//!
//! The response is a JSON object keyed by disease identifier. Each bundle is
//! read field by field so that one malformed sub-field degrades to a neutral
//! default instead of discarding the disease.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Key of the non-disease entry describing how the service routed the request.
pub const ROUTING_METADATA_KEY: &str = "routing_info";

/// Keys the factor-attribution object may appear under.
const ATTRIBUTION_KEYS: [&str; 3] = ["risk_factors", "factors", "feature_importance"];

/// Raw response: disease identifier → bundle (or error marker).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionResponse(Map<String, Value>);

impl PredictionResponse {
    pub fn new(entries: Map<String, Value>) -> Self {
        Self(entries)
    }

    /// Wraps a JSON value, returning `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How a response entry should be treated.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEntry {
    Disease(PredictionBundle),
    /// The service could not score this disease.
    Error(String),
    RoutingMetadata,
}

impl ResponseEntry {
    pub fn classify(key: &str, value: &Value) -> Self {
        if key == ROUTING_METADATA_KEY {
            return Self::RoutingMetadata;
        }
        match value {
            Value::Object(map) => match map.get("error") {
                Some(Value::String(message)) => Self::Error(message.clone()),
                Some(Value::Null) | None => Self::Disease(PredictionBundle::from_value(value)),
                Some(other) => Self::Error(other.to_string()),
            },
            other => Self::Error(format!("expected an object, got {}", other)),
        }
    }
}

/// One disease's prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionBundle {
    pub prediction: Option<i64>,
    /// Model confidence, 0–1.
    pub confidence: f64,
    /// Risk score, 0–100.
    pub risk_score: f64,
    pub increasing_risk: Vec<FactorAttribution>,
    pub decreasing_risk: Vec<FactorAttribution>,
    pub population_comparison: Option<PopulationComparison>,
}

impl PredictionBundle {
    /// Reads a bundle leniently: every missing or mistyped sub-field takes
    /// its neutral default (score 0, no factors, no comparison).
    pub fn from_value(value: &Value) -> Self {
        let attributions = ATTRIBUTION_KEYS
            .iter()
            .find_map(|key| value.get(*key).filter(|v| v.is_object()));

        Self {
            prediction: value.get("prediction").and_then(as_flag),
            confidence: value
                .get("confidence")
                .or_else(|| value.get("confidence_score"))
                .and_then(as_number)
                .unwrap_or(0.0),
            risk_score: value.get("risk_score").and_then(as_number).unwrap_or(0.0),
            increasing_risk: parse_attributions(attributions.and_then(|a| a.get("increasing_risk"))),
            decreasing_risk: parse_attributions(attributions.and_then(|a| a.get("decreasing_risk"))),
            population_comparison: value
                .get("population_comparison")
                .and_then(PopulationComparison::from_value),
        }
    }
}

/// A single factor's signed contribution to a disease's risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorAttribution {
    #[serde(alias = "feature_code", alias = "factor")]
    pub feature: String,
    #[serde(default)]
    pub importance: f64,
    #[serde(default, alias = "is_modifiable")]
    pub modifiable: bool,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

/// How the respondent compares to a reference population.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationComparison {
    #[serde(default)]
    pub age_range: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub user_risk: Option<f64>,
    #[serde(default)]
    pub population_mean: f64,
    #[serde(default)]
    pub population_std_dev: f64,
    #[serde(default)]
    pub percentile: f64,
    #[serde(default)]
    pub sample_size: u64,
}

impl FactorAttribution {
    /// Reads one attribution. Only the feature code is mandatory; `null` or
    /// mistyped sub-fields take neutral defaults.
    pub fn from_value(value: &Value) -> Option<Self> {
        let feature = ["feature", "feature_code", "factor"]
            .iter()
            .find_map(|key| value.get(*key).and_then(as_text))?;

        Some(Self {
            feature,
            importance: value.get("importance").and_then(as_number).unwrap_or(0.0),
            modifiable: value
                .get("modifiable")
                .or_else(|| value.get("is_modifiable"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
            recommendation: value.get("recommendation").and_then(as_text),
            value: value.get("value").filter(|v| !v.is_null()).cloned(),
        })
    }
}

impl PopulationComparison {
    /// Reads a comparison field by field. Returns `None` only when the value
    /// is not a non-empty object.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.as_object().is_some_and(|o| !o.is_empty()) {
            return None;
        }
        let number = |key: &str| value.get(key).and_then(as_number);

        Some(Self {
            age_range: value.get("age_range").and_then(as_text).unwrap_or_default(),
            gender: value.get("gender").and_then(as_text).unwrap_or_default(),
            user_risk: number("user_risk"),
            population_mean: number("population_mean").unwrap_or(0.0),
            population_std_dev: number("population_std_dev").unwrap_or(0.0),
            percentile: number("percentile").unwrap_or(0.0),
            sample_size: number("sample_size")
                .filter(|n| *n >= 0.0)
                .map(|n| n.round() as u64)
                .unwrap_or(0),
        })
    }
}

fn as_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn as_flag(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

fn parse_attributions(value: Option<&Value>) -> Vec<FactorAttribution> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let attribution = FactorAttribution::from_value(item);
            if attribution.is_none() {
                debug!("Skipping factor attribution without a feature code: {}", item);
            }
            attribution
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_bundle_is_read() {
        let value = json!({
            "prediction": 1,
            "confidence": 0.82,
            "risk_score": 64,
            "risk_factors": {
                "increasing_risk": [
                    {"feature": "BMXWAIST", "importance": 0.4, "modifiable": true,
                     "recommendation": "Reduce waist size", "value": 101.0}
                ],
                "decreasing_risk": [
                    {"feature": "PAD680", "importance": -0.2, "modifiable": true}
                ]
            },
            "population_comparison": {
                "age_range": "40-49", "gender": "Male", "population_mean": 35.5,
                "population_std_dev": 12.1, "percentile": 78.0, "sample_size": 1523
            }
        });

        let bundle = PredictionBundle::from_value(&value);
        assert_eq!(bundle.prediction, Some(1));
        assert_eq!(bundle.risk_score, 64.0);
        assert_eq!(bundle.increasing_risk.len(), 1);
        assert_eq!(bundle.decreasing_risk[0].feature, "PAD680");
        let comparison = bundle.population_comparison.unwrap();
        assert_eq!(comparison.age_range, "40-49");
        assert_eq!(comparison.sample_size, 1523);
    }

    #[test]
    fn missing_sub_fields_default_to_neutral_values() {
        let bundle = PredictionBundle::from_value(&json!({"prediction": 0}));
        assert_eq!(bundle.risk_score, 0.0);
        assert!(bundle.increasing_risk.is_empty());
        assert!(bundle.decreasing_risk.is_empty());
        assert!(bundle.population_comparison.is_none());
    }

    #[test]
    fn mistyped_sub_fields_do_not_discard_the_bundle() {
        let value = json!({
            "risk_score": "42",
            "risk_factors": {"increasing_risk": [{"importance": 0.3}, {"feature": "LBXGH", "importance": 0.5}]},
            "population_comparison": {"sample_size": "lots", "percentile": 61}
        });
        let bundle = PredictionBundle::from_value(&value);
        assert_eq!(bundle.risk_score, 42.0);
        assert_eq!(bundle.increasing_risk.len(), 1);
        let comparison = bundle.population_comparison.unwrap();
        assert_eq!(comparison.sample_size, 0);
        assert_eq!(comparison.percentile, 61.0);
    }

    #[test]
    fn attribution_aliases_are_accepted() {
        let value = json!({"factors": {"increasing_risk": [
            {"feature_code": "LBXGH", "importance": 0.5, "is_modifiable": true}
        ]}});
        let bundle = PredictionBundle::from_value(&value);
        assert_eq!(bundle.increasing_risk[0].feature, "LBXGH");
        assert!(bundle.increasing_risk[0].modifiable);
    }

    #[test]
    fn entries_are_classified() {
        assert_eq!(
            ResponseEntry::classify(ROUTING_METADATA_KEY, &json!({"models": ["full"]})),
            ResponseEntry::RoutingMetadata
        );
        assert_eq!(
            ResponseEntry::classify("ckd", &json!({"error": "missing LBXSUA"})),
            ResponseEntry::Error("missing LBXSUA".to_string())
        );
        assert!(matches!(
            ResponseEntry::classify("cvd", &json!("oops")),
            ResponseEntry::Error(_)
        ));
        assert!(matches!(
            ResponseEntry::classify("cvd", &json!({"risk_score": 12})),
            ResponseEntry::Disease(_)
        ));
    }

    #[test]
    fn empty_population_comparison_is_treated_as_absent() {
        let bundle = PredictionBundle::from_value(&json!({"population_comparison": {}}));
        assert!(bundle.population_comparison.is_none());
    }

    #[test]
    fn null_sub_fields_keep_the_record() {
        let value = json!({
            "risk_score": 55,
            "risk_factors": {"increasing_risk": [
                {"feature": "BMXWAIST", "importance": 0.4, "modifiable": null},
                {"feature": "LBXGH", "importance": null, "modifiable": true, "recommendation": null}
            ]},
            "population_comparison": {
                "age_range": "50-59", "gender": null, "population_mean": 30.0,
                "percentile": 64.5, "sample_size": 1200.0
            }
        });

        let bundle = PredictionBundle::from_value(&value);

        assert_eq!(bundle.increasing_risk.len(), 2);
        assert!(!bundle.increasing_risk[0].modifiable);
        assert_eq!(bundle.increasing_risk[1].importance, 0.0);
        assert!(bundle.increasing_risk[1].recommendation.is_none());
        let comparison = bundle.population_comparison.unwrap();
        assert_eq!(comparison.gender, "");
        assert_eq!(comparison.sample_size, 1200);
        assert_eq!(comparison.age_range, "50-59");
    }

    #[test]
    fn non_object_attribution_key_falls_through_to_the_next() {
        let value = json!({
            "risk_factors": null,
            "feature_importance": {"decreasing_risk": [
                {"feature": "PAD680", "importance": -0.3, "modifiable": true}
            ]}
        });

        let bundle = PredictionBundle::from_value(&value);

        assert_eq!(bundle.decreasing_risk.len(), 1);
        assert_eq!(bundle.decreasing_risk[0].feature, "PAD680");
    }
}

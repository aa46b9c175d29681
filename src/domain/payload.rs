//! Payload formatting: feature maps → prediction request body.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::features::{FeatureMap, FeatureValue};

/// Flat feature code → value mapping sent to the prediction service.
///
/// Absent values are kept and serialize as `null`, so the service can tell
/// "not provided" from "provided as zero".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeaturePayload(BTreeMap<String, Option<FeatureValue>>);

impl FeaturePayload {
    pub fn get(&self, code: &str) -> Option<FeatureValue> {
        self.0.get(code).copied().flatten()
    }

    /// True if `code` is present in the payload, with or without a value.
    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<FeatureValue>)> {
        self.0.iter().map(|(code, value)| (code.as_str(), *value))
    }

    /// Number of codes transmitted without a value.
    pub fn null_count(&self) -> usize {
        self.0.values().filter(|v| v.is_none()).count()
    }
}

/// The outbound request: `{"input_data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub input_data: FeaturePayload,
}

impl PredictionRequest {
    pub fn new(input_data: FeaturePayload) -> Self {
        Self { input_data }
    }
}

/// Merges the required and optional maps into one flat payload.
///
/// Every code of both universes appears exactly once; nothing is filtered,
/// reordered or renamed.
pub fn format_payload(required: &FeatureMap, optional: &FeatureMap) -> FeaturePayload {
    FeaturePayload(
        required
            .iter()
            .chain(optional.iter())
            .map(|(code, value)| (code.to_string(), value))
            .collect(),
    )
}

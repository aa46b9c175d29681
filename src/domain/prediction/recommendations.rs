//! Factor → recommendation text table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Advice shown for a modifiable factor that has no specific recommendation.
pub const DEFAULT_RECOMMENDATION: &str =
    "Consult with your healthcare provider for personalized advice";

/// Feature code → recommendation text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationTable(BTreeMap<String, String>);

impl RecommendationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    /// Sets the text for `code`, replacing any previous entry.
    pub fn insert(&mut self, code: impl Into<String>, text: impl Into<String>) {
        self.0.insert(code.into(), text.into());
    }

    /// Adds every entry of `fallback` whose code is not already present.
    pub fn overlay_fallback(&mut self, fallback: &RecommendationTable) {
        for (code, text) in &fallback.0 {
            self.0.entry(code.clone()).or_insert_with(|| text.clone());
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RecommendationTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

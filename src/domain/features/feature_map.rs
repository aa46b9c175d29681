//! Strict-schema feature container.
//!
//! A `FeatureMap` is built from a fixed universe of feature codes and holds
//! exactly one value slot per code. Writes are checked against the universe;
//! reads are permissive.

use std::collections::BTreeMap;
use thiserror::Error;

use super::{FeatureCode, FeatureValue};

/// Raised when writing a code that is not part of the map's universe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot add new feature '{code}'. Allowed features: {}", .allowed.join(", "))]
pub struct UnknownFeatureError {
    pub code: String,
    pub allowed: Vec<String>,
}

/// Fixed-key map from feature code to an optional value.
///
/// The key set is frozen at construction; no operation adds or removes keys.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMap {
    values: BTreeMap<FeatureCode, Option<FeatureValue>>,
}

impl FeatureMap {
    /// Creates a map with every code of `universe` initialized to absent.
    pub fn new<I, C>(universe: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<FeatureCode>,
    {
        Self {
            values: universe.into_iter().map(|code| (code.into(), None)).collect(),
        }
    }

    /// Replaces the value stored for `code`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFeatureError` if `code` is outside the universe.
    pub fn update(
        &mut self,
        code: &str,
        value: Option<FeatureValue>,
    ) -> Result<(), UnknownFeatureError> {
        match self.values.get_mut(code) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(UnknownFeatureError {
                code: code.to_string(),
                allowed: self.values.keys().map(|c| c.to_string()).collect(),
            }),
        }
    }

    /// Returns the stored value, or `None` when absent or unknown.
    pub fn get(&self, code: &str) -> Option<FeatureValue> {
        self.values.get(code).copied().flatten()
    }

    /// True if any code currently holds no value.
    pub fn has_missing(&self) -> bool {
        self.values.values().any(Option::is_none)
    }

    /// Codes that currently hold no value, in key order.
    pub fn missing_codes(&self) -> impl Iterator<Item = &FeatureCode> {
        self.values
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(code, _)| code)
    }

    /// Clears every value to absent, keeping the key set.
    pub fn reset(&mut self) {
        self.values.values_mut().for_each(|value| *value = None);
    }

    pub fn contains(&self, code: &str) -> bool {
        self.values.contains_key(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &FeatureCode> {
        self.values.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FeatureCode, Option<FeatureValue>)> {
        self.values.iter().map(|(code, value)| (code, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Snapshot of the current contents.
    pub fn to_map(&self) -> BTreeMap<FeatureCode, Option<FeatureValue>> {
        self.values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_map() -> FeatureMap {
        FeatureMap::new(["RIDAGEYR", "RIAGENDR", "BMXBMI"])
    }

    #[test]
    fn new_map_starts_with_every_code_absent() {
        let map = sample_map();
        assert_eq!(map.len(), 3);
        assert!(map.has_missing());
        assert_eq!(map.missing_codes().count(), 3);
        assert_eq!(map.get("RIDAGEYR"), None);
    }

    #[test]
    fn update_replaces_value_for_known_code() {
        let mut map = sample_map();
        map.update("RIDAGEYR", Some(FeatureValue::Integer(45))).unwrap();
        assert_eq!(map.get("RIDAGEYR"), Some(FeatureValue::Integer(45)));

        map.update("RIDAGEYR", None).unwrap();
        assert_eq!(map.get("RIDAGEYR"), None);
    }

    #[test]
    fn update_rejects_unknown_code_and_names_allowed_set() {
        let mut map = sample_map();
        let err = map.update("LBXGH", Some(FeatureValue::Decimal(6.8))).unwrap_err();

        assert_eq!(err.code, "LBXGH");
        assert_eq!(err.allowed, vec!["BMXBMI", "RIAGENDR", "RIDAGEYR"]);
        assert!(err.to_string().contains("LBXGH"));
        assert!(!map.contains("LBXGH"));
    }

    #[test]
    fn get_is_permissive_for_unknown_codes() {
        assert_eq!(sample_map().get("NOT_A_CODE"), None);
    }

    #[test]
    fn has_missing_is_false_once_every_code_is_set() {
        let mut map = sample_map();
        map.update("RIDAGEYR", Some(FeatureValue::Integer(45))).unwrap();
        map.update("RIAGENDR", Some(FeatureValue::Integer(1))).unwrap();
        assert!(map.has_missing());

        map.update("BMXBMI", Some(FeatureValue::Decimal(24.69))).unwrap();
        assert!(!map.has_missing());
    }

    #[test]
    fn reset_clears_values_but_keeps_keys() {
        let mut map = sample_map();
        map.update("RIAGENDR", Some(FeatureValue::Integer(2))).unwrap();
        map.reset();

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("RIAGENDR"), None);
        assert!(map.contains("RIAGENDR"));
    }

    proptest! {
        #[test]
        fn key_set_never_changes(writes in proptest::collection::vec(("[A-Z]{3,8}", any::<i64>()), 0..40)) {
            let mut map = sample_map();
            let before: Vec<String> = map.codes().map(|c| c.to_string()).collect();

            for (code, value) in &writes {
                let known = map.contains(code);
                let result = map.update(code, Some(FeatureValue::Integer(*value)));
                prop_assert_eq!(result.is_ok(), known);
            }

            let after: Vec<String> = map.codes().map(|c| c.to_string()).collect();
            prop_assert_eq!(before, after);
        }
    }
}

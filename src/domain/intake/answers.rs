//! Raw answers as produced by the survey form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::features::{AnswerKind, FeatureValue, MappingTable};

/// The value of a single form control.
///
/// Number inputs and sliders arrive as numbers, select boxes as labels,
/// and pills either as their numeric option or as their label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAnswer {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl From<f64> for RawAnswer {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawAnswer {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for RawAnswer {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawAnswer {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for RawAnswer {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// All answers of one submission, keyed by UI key.
///
/// Keys are not constrained to the feature universe. A JSON `null` is kept
/// as an explicitly unanswered control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAnswers(BTreeMap<String, Option<RawAnswer>>);

impl RawAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, answer: impl Into<RawAnswer>) -> Self {
        self.insert(key, answer);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, answer: impl Into<RawAnswer>) {
        self.0.insert(key.into(), Some(answer.into()));
    }

    pub fn remove(&mut self, key: &str) -> Option<RawAnswer> {
        self.0.remove(key).flatten()
    }

    pub fn get(&self, key: &str) -> Option<&RawAnswer> {
        self.0.get(key).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A finite number, parsing numeric text.
    pub fn number(&self, key: &str) -> Option<f64> {
        let value = match self.get(key)? {
            RawAnswer::Number(n) => *n,
            RawAnswer::Text(text) => text.trim().parse::<f64>().ok()?,
            RawAnswer::Flag(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// A strictly positive number; anything else is treated as unanswered.
    pub fn positive_number(&self, key: &str) -> Option<f64> {
        self.number(key).filter(|n| *n > 0.0)
    }

    /// A non-empty, trimmed label.
    pub fn label(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            RawAnswer::Text(text) => Some(text.trim()).filter(|t| !t.is_empty()),
            _ => None,
        }
    }

    /// A coded answer given either as one of the table's codes or as a label.
    pub fn coded(&self, key: &str, table: &MappingTable) -> Option<FeatureValue> {
        match self.get(key)? {
            RawAnswer::Number(n) => code_in_table(*n, table),
            RawAnswer::Text(text) => table
                .resolve(text)
                .or_else(|| text.trim().parse::<f64>().ok().and_then(|n| code_in_table(n, table))),
            RawAnswer::Flag(flag) => table.resolve(if *flag { "Yes" } else { "No" }),
        }
    }

    /// Interprets the answer under `key` according to `kind`.
    ///
    /// Malformed input resolves to `None`; this never fails.
    pub fn resolve(&self, key: &str, kind: AnswerKind) -> Option<FeatureValue> {
        match kind {
            AnswerKind::Measurement => self
                .positive_number(key)
                .and_then(FeatureValue::from_measurement),
            AnswerKind::Coded(table) => self.coded(key, table),
            AnswerKind::Categorical(table) => self.label(key).and_then(|l| table.resolve(l)),
        }
    }
}

fn code_in_table(n: f64, table: &MappingTable) -> Option<FeatureValue> {
    if n.fract() != 0.0 {
        return None;
    }
    let code = n as i64;
    table.contains_code(code).then_some(FeatureValue::Integer(code))
}

impl FromIterator<(String, RawAnswer)> for RawAnswers {
    fn from_iter<T: IntoIterator<Item = (String, RawAnswer)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k, Some(v))).collect())
    }
}

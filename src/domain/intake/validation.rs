//! Required-answer validation.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::features::{AnswerField, FeatureSchema, Requirement};

use super::RawAnswers;

/// A required answer that is absent or could not be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField {
    pub key: &'static str,
    pub label: &'static str,
}

/// Every missing required answer of a submission, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingAnswers {
    fields: Vec<MissingField>,
}

impl MissingAnswers {
    pub fn fields(&self) -> &[MissingField] {
        &self.fields
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.key).collect()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.label).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key == key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// UI key → human-readable label.
    pub fn to_map(&self) -> BTreeMap<&'static str, &'static str> {
        self.fields.iter().map(|f| (f.key, f.label)).collect()
    }
}

impl fmt::Display for MissingAnswers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Please fill in all required fields: {}", self.labels().join(", "))
    }
}

impl std::error::Error for MissingAnswers {}

/// Checks that every required answer is present and interpretable,
/// including answers made required by a conditional rule.
///
/// All missing answers are collected before returning.
pub fn validate_answers(schema: &FeatureSchema, answers: &RawAnswers) -> Result<(), MissingAnswers> {
    let fields: Vec<MissingField> = schema
        .fields()
        .iter()
        .filter(|field| is_required(schema, field, answers))
        .filter(|field| answers.resolve(field.key, field.kind).is_none())
        .map(|field| MissingField {
            key: field.key,
            label: field.label,
        })
        .collect();

    if fields.is_empty() {
        Ok(())
    } else {
        Err(MissingAnswers { fields })
    }
}

/// Whether `field` must be answered given the rest of the answers.
pub(crate) fn is_required(schema: &FeatureSchema, field: &AnswerField, answers: &RawAnswers) -> bool {
    match field.requirement {
        Requirement::Always => true,
        Requirement::Optional => false,
        Requirement::RequiredIf { trigger, equals, .. } => trigger_matches(schema, trigger, equals, answers),
    }
}

/// True when the answer under `trigger` resolves to the integer code `equals`.
pub(crate) fn trigger_matches(
    schema: &FeatureSchema,
    trigger: &str,
    equals: i64,
    answers: &RawAnswers,
) -> bool {
    schema
        .field(trigger)
        .and_then(|t| answers.resolve(t.key, t.kind))
        .and_then(|v| v.as_code())
        == Some(equals)
}

//! Input normalization: raw answers → feature maps.

use thiserror::Error;
use tracing::debug;

use crate::domain::features::{
    Derivation, FeatureMap, FeatureSchema, FeatureValue, Requirement, Target, UnknownFeatureError,
    Universe,
};

use super::derived::compute_bmi;
use super::validation::{trigger_matches, validate_answers, MissingAnswers};
use super::RawAnswers;

/// Errors from a normalization pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// One or more required answers are missing; nothing was written.
    #[error(transparent)]
    MissingAnswers(#[from] MissingAnswers),

    /// The schema names a code the target map does not hold.
    #[error(transparent)]
    UnknownFeature(#[from] UnknownFeatureError),
}

/// Turns one submission's raw answers into populated feature maps.
#[derive(Debug, Clone, Copy)]
pub struct InputNormalizer<'s> {
    schema: &'s FeatureSchema,
}

impl InputNormalizer<'static> {
    /// Normalizer over the standard schema.
    pub fn standard() -> Self {
        Self::new(FeatureSchema::standard())
    }
}

impl<'s> InputNormalizer<'s> {
    pub fn new(schema: &'s FeatureSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'s FeatureSchema {
        self.schema
    }

    /// Validation stage only.
    pub fn validate(&self, answers: &RawAnswers) -> Result<(), MissingAnswers> {
        validate_answers(self.schema, answers)
    }

    /// Validates `answers` and, if nothing required is missing, writes every
    /// schema code into `required` and `optional`.
    pub fn normalize(
        &self,
        answers: &RawAnswers,
        required: &mut FeatureMap,
        optional: &mut FeatureMap,
    ) -> Result<(), NormalizeError> {
        self.validate(answers)?;
        self.apply(answers, required, optional)?;
        Ok(())
    }

    /// Mapping stage: direct copies, categorical resolution, conditional
    /// values and derived values.
    ///
    /// Codes the schema does not name are left untouched.
    pub fn apply(
        &self,
        answers: &RawAnswers,
        required: &mut FeatureMap,
        optional: &mut FeatureMap,
    ) -> Result<(), UnknownFeatureError> {
        for field in self.schema.fields() {
            let Target::Feature(code, universe) = field.target else {
                continue;
            };

            let value = match field.requirement {
                Requirement::RequiredIf {
                    trigger,
                    equals,
                    otherwise,
                } => {
                    if trigger_matches(self.schema, trigger, equals, answers) {
                        answers.resolve(field.key, field.kind)
                    } else {
                        Some(FeatureValue::Integer(otherwise))
                    }
                }
                Requirement::Always | Requirement::Optional => answers.resolve(field.key, field.kind),
            };

            if value.is_none() && answers.get(field.key).is_some() {
                debug!(field = field.key, "answer could not be interpreted; writing absent");
            }

            select(universe, required, optional).update(code, value)?;
        }

        for derived in self.schema.derived() {
            let value = match derived.derivation {
                Derivation::BodyMassIndex {
                    weight_key,
                    height_key,
                } => compute_bmi(answers.number(weight_key), answers.number(height_key))
                    .map(FeatureValue::Decimal),
            };
            select(derived.universe, required, optional).update(derived.code, value)?;
        }

        Ok(())
    }
}

fn select<'m>(
    universe: Universe,
    required: &'m mut FeatureMap,
    optional: &'m mut FeatureMap,
) -> &'m mut FeatureMap {
    match universe {
        Universe::Required => required,
        Universe::Optional => optional,
    }
}

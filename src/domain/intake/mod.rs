//! Intake - turning survey answers into the coded feature schema.
//!
//! Validation reports every missing required answer at once; the mapping
//! stage never fails on malformed input, it writes absent instead.

mod answers;
mod derived;
mod normalizer;
mod submission;
mod validation;

pub use answers::{RawAnswer, RawAnswers};
pub use derived::compute_bmi;
pub use normalizer::{InputNormalizer, NormalizeError};
pub use submission::SubmissionId;
pub use validation::{validate_answers, MissingAnswers, MissingField};

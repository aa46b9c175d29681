//! Assessment handlers.

mod submit_assessment;

pub use submit_assessment::{
    AssessmentOutcome, SubmitAssessmentCommand, SubmitAssessmentError, SubmitAssessmentHandler,
};

//! Application handlers.
//!
//! Command handlers that orchestrate domain operations across ports.

pub mod assessment;

pub use assessment::{
    AssessmentOutcome, SubmitAssessmentCommand, SubmitAssessmentError, SubmitAssessmentHandler,
};

//! Adapters - Implementations of port interfaces.
//!
//! - `prediction` - Prediction service clients (HTTP, mock)
//! - `recommendations` - Fallback recommendation sources (file, in-memory)

pub mod prediction;
pub mod recommendations;

pub use prediction::{HttpPredictionService, MockError, MockPredictionService};
pub use recommendations::{FileRecommendationSource, InMemoryRecommendationSource};

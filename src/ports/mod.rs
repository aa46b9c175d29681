//! Ports - interfaces to the outside world.
//!
//! - `PredictionService` - submits feature payloads to the disease-risk service
//! - `RecommendationSource` - loads static fallback recommendation texts

mod prediction_service;
mod recommendation_source;

pub use prediction_service::{
    FailureCategory, PredictionService, PredictionServiceError, ServiceDiagnostic,
};
pub use recommendation_source::{RecommendationSource, RecommendationSourceError};

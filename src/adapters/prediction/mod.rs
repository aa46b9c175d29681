//! Prediction service adapters.

mod http_prediction_service;
mod mock_prediction_service;

pub use http_prediction_service::HttpPredictionService;
pub use mock_prediction_service::{MockError, MockPredictionService};

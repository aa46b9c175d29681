//! Prediction results - reshaping the service's per-disease response into
//! a display model.
//!
//! - `response` - raw response types, read leniently per disease
//! - `status` - the score → risk status rule
//! - `labels` - disease/factor names and factor value formatting
//! - `display` - the display model
//! - `normalizer` - response → display model, factor ranking, recommendation merge
//! - `summary` - plain-text rendering of the display model

pub mod display;
pub mod formatting;
pub mod labels;
mod normalizer;
pub mod recommendations;
pub mod response;
mod status;
mod summary;

pub use display::{DisplayModel, PopulationOverview, RiskFactor, RiskScore};
pub use formatting::{format_ordinal, format_percentage};
pub use normalizer::{rank_factors, ResponseNormalizer};
pub use recommendations::{RecommendationTable, DEFAULT_RECOMMENDATION};
pub use response::{
    FactorAttribution, PopulationComparison, PredictionBundle, PredictionResponse, ResponseEntry,
    ROUTING_METADATA_KEY,
};
pub use status::{RiskStatus, HIGH_RISK_THRESHOLD, MODERATE_RISK_THRESHOLD};
pub use summary::render_summary;

//! Domain layer: the feature schema, intake normalization, the outbound
//! payload and reshaping of prediction results.
//!
//! # Module Organization
//!
//! - `features` - Feature codes, values, mapping tables, the schema and feature maps
//! - `intake` - Raw answers, validation and the input normalizer
//! - `payload` - The request body sent to the prediction service
//! - `prediction` - Response types, risk status and the display model

pub mod features;
pub mod intake;
pub mod payload;
pub mod prediction;

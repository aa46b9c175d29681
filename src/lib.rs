//! Health Risk Intake - survey normalization and disease-risk result display
//!
//! Turns raw health-survey answers into the coded feature payload expected by
//! the disease-risk prediction service, and reshapes the service's
//! per-disease response into a model a UI can render directly.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Prediction service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Prediction service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionConfig {
    /// Service origin, without the endpoint path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Endpoint that scores every disease at once
    #[serde(default = "default_predict_path")]
    pub predict_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl PredictionConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of the prediction endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.predict_path)
    }

    /// Validate prediction configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PREDICTION__BASE_URL"));
        }
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ValidationError::InvalidBaseUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidBaseUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }
        if !self.predict_path.starts_with('/') {
            return Err(ValidationError::InvalidPredictPath);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            predict_path: default_predict_path(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://disease-warning-1.onrender.com".to_string()
}

fn default_predict_path() -> String {
    "/prediction/all".to_string()
}

fn default_timeout() -> u64 {
    30
}

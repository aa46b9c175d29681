//! HTTP Prediction Service - PredictionService over the service's REST API.
//!
//! Posts `{"input_data": {...}}` to the configured endpoint and expects a
//! JSON object keyed by disease. A fixed client-level timeout bounds the
//! whole exchange, and nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::PredictionConfig;
use crate::domain::payload::PredictionRequest;
use crate::domain::prediction::PredictionResponse;
use crate::ports::{PredictionService, PredictionServiceError};

/// Prediction service client backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpPredictionService {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl HttpPredictionService {
    /// Creates a client for the configured endpoint.
    pub fn new(config: &PredictionConfig) -> Result<Self, PredictionServiceError> {
        Self::with_endpoint(config.endpoint(), config.timeout())
    }

    /// Creates a client for an explicit endpoint URL.
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PredictionServiceError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            PredictionServiceError::network(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            endpoint: endpoint.into(),
            timeout,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, e: reqwest::Error) -> PredictionServiceError {
        if e.is_timeout() {
            PredictionServiceError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            PredictionServiceError::network(format!("Connection failed: {}", e))
        } else {
            PredictionServiceError::network(e.to_string())
        }
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionServiceError> {
        debug!(
            endpoint = %self.endpoint,
            features = request.input_data.len(),
            absent = request.input_data.null_count(),
            "Submitting prediction request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let err = self.transport_error(e);
                error!("Prediction request failed: {}", err);
                err
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Failed to read error response body: {}", e);
                    format!("<unreadable response body: {}>", e)
                }
            };
            warn!(status = status.as_u16(), "Prediction service returned an error status");
            return Err(PredictionServiceError::status(status.as_u16(), &body));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                PredictionServiceError::unexpected(format!("Failed to parse response: {}", e))
            }
        })?;

        let kind = json_kind(&body);
        let prediction = PredictionResponse::from_value(body).ok_or_else(|| {
            PredictionServiceError::unexpected(format!("expected a JSON object, got {}", kind))
        })?;

        debug!(entries = prediction.len(), "Received prediction response");
        Ok(prediction)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_comes_from_config() {
        let config = PredictionConfig {
            base_url: "http://localhost:8000".to_string(),
            ..Default::default()
        };
        let service = HttpPredictionService::new(&config).unwrap();
        assert_eq!(service.endpoint(), "http://localhost:8000/prediction/all");
    }

    #[test]
    fn json_kinds_are_described() {
        assert_eq!(json_kind(&serde_json::json!([1])), "an array");
        assert_eq!(json_kind(&Value::Null), "null");
    }
}

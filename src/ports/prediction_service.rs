//! Prediction Service Port - Interface to the external disease-risk service.
//!
//! The service accepts one formatted feature payload and answers with a
//! per-disease prediction object. Implementations own the transport; the
//! application layer only sees [`PredictionServiceError`] and its
//! [`FailureCategory`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::payload::PredictionRequest;
use crate::domain::prediction::PredictionResponse;

/// Port for submitting feature payloads to the prediction service.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Submits one payload and waits for the per-disease response.
    ///
    /// Exactly one request is made; failures are never retried here.
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionServiceError>;
}

/// Body the service returned alongside a failure status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceDiagnostic {
    Json(Value),
    Text(String),
}

impl ServiceDiagnostic {
    /// Parses a response body as JSON, keeping the raw text when it is not.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body)
            .map(Self::Json)
            .unwrap_or_else(|_| Self::Text(body.to_string()))
    }
}

impl std::fmt::Display for ServiceDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{}", value),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// User-visible failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Connection refused, DNS failure, or timeout.
    Network,
    /// Non-200 status or a body that is not a prediction object.
    UnexpectedResponse,
}

impl FailureCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "network failure",
            Self::UnexpectedResponse => "unexpected response",
        }
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Prediction service errors.
#[derive(Debug, thiserror::Error)]
pub enum PredictionServiceError {
    /// Transport failure before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The fixed request timeout expired.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The service answered with a non-success status.
    #[error("service returned status {status}: {diagnostic}")]
    Status {
        status: u16,
        diagnostic: ServiceDiagnostic,
    },

    /// A 200 response whose body is not a JSON object.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl PredictionServiceError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an unexpected-response error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse(message.into())
    }

    /// Creates a status error from the raw response body.
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            diagnostic: ServiceDiagnostic::from_body(body),
        }
    }

    pub fn category(&self) -> FailureCategory {
        match self {
            Self::Network(_) | Self::Timeout { .. } => FailureCategory::Network,
            Self::Status { .. } | Self::UnexpectedResponse(_) => {
                FailureCategory::UnexpectedResponse
            }
        }
    }

    /// The service's diagnostic payload, when one was returned.
    pub fn diagnostic(&self) -> Option<&ServiceDiagnostic> {
        match self {
            Self::Status { diagnostic, .. } => Some(diagnostic),
            _ => None,
        }
    }
}

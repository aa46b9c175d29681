//! Mock Prediction Service for testing.
//!
//! Returns queued responses in order, records every request, and can
//! inject any failure the real client produces.
//!
//! # Example
//!
//! ```ignore
//! let service = MockPredictionService::new()
//!     .with_response(json!({"cvd": {"risk_score": 72}}))
//!     .with_error(MockError::Timeout { timeout_secs: 30 });
//! ```

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::payload::PredictionRequest;
use crate::domain::prediction::PredictionResponse;
use crate::ports::{PredictionService, PredictionServiceError};

/// Mock prediction service.
#[derive(Debug, Clone, Default)]
pub struct MockPredictionService {
    /// Pre-configured outcomes (consumed in order).
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<PredictionRequest>>>,
}

#[derive(Debug, Clone)]
enum MockOutcome {
    Response(Map<String, Value>),
    Error(MockError),
}

/// Failures the mock can inject.
#[derive(Debug, Clone)]
pub enum MockError {
    Network { message: String },
    Timeout { timeout_secs: u64 },
    Status { status: u16, body: String },
    UnexpectedResponse { message: String },
}

impl From<MockError> for PredictionServiceError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::Network { message } => PredictionServiceError::network(message),
            MockError::Timeout { timeout_secs } => PredictionServiceError::Timeout { timeout_secs },
            MockError::Status { status, body } => PredictionServiceError::status(status, &body),
            MockError::UnexpectedResponse { message } => {
                PredictionServiceError::unexpected(message)
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockPredictionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response body. Non-object values queue an
    /// unexpected-response error, as the real client would report.
    pub fn with_response(self, body: Value) -> Self {
        let outcome = match body {
            Value::Object(map) => MockOutcome::Response(map),
            other => MockOutcome::Error(MockError::UnexpectedResponse {
                message: format!("expected a JSON object, got {}", other),
            }),
        };
        lock(&self.outcomes).push_back(outcome);
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.outcomes).push_back(MockOutcome::Error(error));
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded requests.
    pub fn get_calls(&self) -> Vec<PredictionRequest> {
        lock(&self.calls).clone()
    }

    /// An exhausted queue answers with an empty object.
    fn next_outcome(&self) -> MockOutcome {
        lock(&self.outcomes)
            .pop_front()
            .unwrap_or_else(|| MockOutcome::Response(Map::new()))
    }
}

#[async_trait]
impl PredictionService for MockPredictionService {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionServiceError> {
        lock(&self.calls).push(request.clone());

        match self.next_outcome() {
            MockOutcome::Response(map) => Ok(PredictionResponse::new(map)),
            MockOutcome::Error(err) => Err(err.into()),
        }
    }
}

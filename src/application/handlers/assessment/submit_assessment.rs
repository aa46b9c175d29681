//! SubmitAssessmentHandler - Runs one submission through the pipeline.
//!
//! validate → normalize → format → predict → reshape. Each submission gets
//! fresh feature maps, so nothing from an earlier submission can leak into
//! the payload.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::domain::features::UnknownFeatureError;
use crate::domain::intake::{
    InputNormalizer, MissingAnswers, NormalizeError, RawAnswers, SubmissionId,
};
use crate::domain::payload::{format_payload, FeaturePayload, PredictionRequest};
use crate::domain::prediction::{DisplayModel, RecommendationTable, ResponseNormalizer};
use crate::ports::{
    FailureCategory, PredictionService, PredictionServiceError, RecommendationSource,
};

/// Command carrying one set of raw survey answers.
#[derive(Debug, Clone)]
pub struct SubmitAssessmentCommand {
    pub answers: RawAnswers,
}

impl SubmitAssessmentCommand {
    pub fn new(answers: RawAnswers) -> Self {
        Self { answers }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentOutcome {
    pub submission_id: SubmissionId,
    pub assessed_at: DateTime<Utc>,
    /// Exactly what was sent to the prediction service.
    pub payload: FeaturePayload,
    pub display: DisplayModel,
}

#[derive(Debug, Error)]
pub enum SubmitAssessmentError {
    /// Required answers are missing; nothing was sent.
    #[error(transparent)]
    MissingAnswers(MissingAnswers),

    #[error("feature schema and feature maps disagree: {0}")]
    Schema(UnknownFeatureError),

    #[error("{}: {0}", .0.category())]
    Prediction(#[from] PredictionServiceError),
}

impl SubmitAssessmentError {
    /// User-visible failure category for service failures.
    pub fn category(&self) -> Option<FailureCategory> {
        match self {
            Self::Prediction(e) => Some(e.category()),
            _ => None,
        }
    }

    pub fn missing_answers(&self) -> Option<&MissingAnswers> {
        match self {
            Self::MissingAnswers(missing) => Some(missing),
            _ => None,
        }
    }
}

impl From<NormalizeError> for SubmitAssessmentError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::MissingAnswers(missing) => Self::MissingAnswers(missing),
            NormalizeError::UnknownFeature(unknown) => Self::Schema(unknown),
        }
    }
}

/// Handler for assessment submissions.
pub struct SubmitAssessmentHandler {
    prediction: Arc<dyn PredictionService>,
    recommendations: Arc<dyn RecommendationSource>,
    normalizer: InputNormalizer<'static>,
    response_normalizer: ResponseNormalizer,
}

impl SubmitAssessmentHandler {
    pub fn new(
        prediction: Arc<dyn PredictionService>,
        recommendations: Arc<dyn RecommendationSource>,
    ) -> Self {
        Self {
            prediction,
            recommendations,
            normalizer: InputNormalizer::standard(),
            response_normalizer: ResponseNormalizer::new(),
        }
    }

    /// Uses a normalizer over a custom schema.
    pub fn with_normalizer(mut self, normalizer: InputNormalizer<'static>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub async fn handle(
        &self,
        cmd: SubmitAssessmentCommand,
    ) -> Result<AssessmentOutcome, SubmitAssessmentError> {
        let submission_id = SubmissionId::new();
        let span = info_span!("submit_assessment", %submission_id);

        self.run(submission_id, cmd.answers).instrument(span).await
    }

    async fn run(
        &self,
        submission_id: SubmissionId,
        answers: RawAnswers,
    ) -> Result<AssessmentOutcome, SubmitAssessmentError> {
        let schema = self.normalizer.schema();
        let mut required = schema.required_map();
        let mut optional = schema.optional_map();

        if let Err(e) = self.normalizer.normalize(&answers, &mut required, &mut optional) {
            warn!("Submission rejected: {}", e);
            return Err(e.into());
        }

        let request = PredictionRequest::new(format_payload(&required, &optional));
        debug!(
            features = request.input_data.len(),
            absent = request.input_data.null_count(),
            "Formatted prediction payload"
        );

        let response = self.prediction.predict(&request).await.map_err(|e| {
            error!(category = %e.category(), "Prediction failed: {}", e);
            e
        })?;

        let fallback = match self.recommendations.load().await {
            Ok(table) => table,
            Err(e) => {
                warn!("Fallback recommendations unavailable: {}", e);
                RecommendationTable::new()
            }
        };

        let model = self.response_normalizer.normalize(&response, &fallback);
        let diseases = model.risk_scores.len();
        info!(diseases, "Assessment complete");

        Ok(AssessmentOutcome {
            submission_id,
            assessed_at: Utc::now(),
            payload: request.input_data,
            display: model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryRecommendationSource, MockError, MockPredictionService};
    use crate::domain::features::{codes, FeatureValue};
    use crate::domain::prediction::RiskStatus;
    use crate::ports::RecommendationSourceError;
    use async_trait::async_trait;
    use serde_json::json;

    // ─────────────────────────────────────────────────────────────────────
    // Mock Implementation
    // ─────────────────────────────────────────────────────────────────────

    struct FailingRecommendationSource;

    #[async_trait]
    impl RecommendationSource for FailingRecommendationSource {
        async fn load(&self) -> Result<RecommendationTable, RecommendationSourceError> {
            Err(RecommendationSourceError::Malformed("expected an object".to_string()))
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────

    fn baseline() -> RawAnswers {
        RawAnswers::new()
            .with(codes::AGE, 45i64)
            .with(codes::GENDER, "Male")
            .with("Weight", 80.0)
            .with("Height", 180.0)
            .with(codes::WAIST, 95.0)
            .with(codes::ALCOHOL, "Never")
            .with(codes::SMOKING_HISTORY, "No")
            .with(codes::PHYSICAL_ACTIVITY, "1-2 hours")
            .with(codes::METAL_OBJECTS, "No")
            .with(codes::CANCER_HISTORY, "No")
            .with(codes::ANGINA_HISTORY, "No")
            .with(codes::COPD_HISTORY, "No")
            .with(codes::ARTHRITIS_HISTORY, "No")
    }

    fn cvd_response() -> serde_json::Value {
        json!({
            "cvd": {
                "prediction": 1,
                "confidence": 0.88,
                "risk_score": 72.4,
                "risk_factors": {
                    "increasing_risk": [
                        {"feature": "BMXWAIST", "importance": 0.42, "modifiable": true, "value": 95,
                         "recommendation": "Reduce waist circumference through diet and exercise."}
                    ],
                    "decreasing_risk": [
                        {"feature": "RIDAGEYR", "importance": -0.61, "modifiable": false, "value": 45}
                    ]
                }
            },
            "routing_info": {"cvd": "full_model"}
        })
    }

    fn handler(
        prediction: MockPredictionService,
        recommendations: Arc<dyn RecommendationSource>,
    ) -> SubmitAssessmentHandler {
        SubmitAssessmentHandler::new(Arc::new(prediction), recommendations)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn complete_answers_produce_display_model() {
        let prediction = MockPredictionService::new().with_response(cvd_response());
        let handler = handler(
            prediction.clone(),
            Arc::new(InMemoryRecommendationSource::default()),
        );

        let outcome = handler
            .handle(SubmitAssessmentCommand::new(baseline()))
            .await
            .unwrap();

        let score = &outcome.display.risk_scores["Cardiovascular Disease"];
        assert_eq!(score.status, RiskStatus::High);
        let factors = outcome.display.factors_for("Cardiovascular Disease");
        assert_eq!(factors[0].code, "RIDAGEYR");
        assert_eq!(factors[1].code, "BMXWAIST");
        assert_eq!(prediction.call_count(), 1);
    }

    #[tokio::test]
    async fn payload_sent_matches_outcome_payload() {
        let prediction = MockPredictionService::new().with_response(cvd_response());
        let handler = handler(
            prediction.clone(),
            Arc::new(InMemoryRecommendationSource::default()),
        );

        let outcome = handler
            .handle(SubmitAssessmentCommand::new(baseline()))
            .await
            .unwrap();

        let sent = &prediction.get_calls()[0].input_data;
        assert_eq!(sent, &outcome.payload);
        assert_eq!(sent.len(), 34);
        assert_eq!(sent.get(codes::BMI), Some(FeatureValue::Decimal(24.69)));
        assert_eq!(sent.get(codes::SMOKING_FREQUENCY), Some(FeatureValue::Integer(0)));
        assert!(sent.contains(codes::HBA1C));
        assert_eq!(sent.get(codes::HBA1C), None);
    }

    #[tokio::test]
    async fn missing_answers_are_reported_without_calling_the_service() {
        let prediction = MockPredictionService::new();
        let handler = handler(
            prediction.clone(),
            Arc::new(InMemoryRecommendationSource::default()),
        );
        let mut answers = baseline();
        answers.remove(codes::AGE);
        answers.remove("Weight");

        let err = handler
            .handle(SubmitAssessmentCommand::new(answers))
            .await
            .unwrap_err();

        let missing = err.missing_answers().unwrap();
        assert_eq!(missing.len(), 2);
        assert!(err.category().is_none());
        assert_eq!(prediction.call_count(), 0);
    }

    #[tokio::test]
    async fn network_failure_is_categorized() {
        let prediction = MockPredictionService::new().with_error(MockError::Network {
            message: "Connection failed: refused".to_string(),
        });
        let handler = handler(prediction, Arc::new(InMemoryRecommendationSource::default()));

        let err = handler
            .handle(SubmitAssessmentCommand::new(baseline()))
            .await
            .unwrap_err();

        assert_eq!(err.category(), Some(FailureCategory::Network));
        assert!(err.to_string().starts_with("network failure"));
    }

    #[tokio::test]
    async fn status_failure_keeps_diagnostic() {
        let prediction = MockPredictionService::new().with_error(MockError::Status {
            status: 500,
            body: "Internal Server Error".to_string(),
        });
        let handler = handler(prediction, Arc::new(InMemoryRecommendationSource::default()));

        let err = handler
            .handle(SubmitAssessmentCommand::new(baseline()))
            .await
            .unwrap_err();

        assert_eq!(err.category(), Some(FailureCategory::UnexpectedResponse));
        match err {
            SubmitAssessmentError::Prediction(e) => assert!(e.diagnostic().is_some()),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn fallback_recommendations_fill_gaps() {
        let source = InMemoryRecommendationSource::default();
        source.insert("RIDAGEYR", "Keep up regular check-ups.").await;
        source.insert("BMXWAIST", "static waist text").await;
        let handler = handler(
            MockPredictionService::new().with_response(cvd_response()),
            Arc::new(source),
        );

        let outcome = handler
            .handle(SubmitAssessmentCommand::new(baseline()))
            .await
            .unwrap();

        let recommendations = &outcome.display.factor_recommendations;
        assert_eq!(
            recommendations.get("BMXWAIST"),
            Some("Reduce waist circumference through diet and exercise.")
        );
        assert_eq!(recommendations.get("RIDAGEYR"), Some("Keep up regular check-ups."));
    }

    #[tokio::test]
    async fn failing_recommendation_source_degrades_to_live_only() {
        let handler = handler(
            MockPredictionService::new().with_response(cvd_response()),
            Arc::new(FailingRecommendationSource),
        );

        let outcome = handler
            .handle(SubmitAssessmentCommand::new(baseline()))
            .await
            .unwrap();

        assert_eq!(outcome.display.factor_recommendations.len(), 1);
    }

    #[tokio::test]
    async fn later_submission_does_not_inherit_earlier_values() {
        let prediction = MockPredictionService::new();
        let handler = handler(
            prediction.clone(),
            Arc::new(InMemoryRecommendationSource::default()),
        );

        let first = baseline().with(codes::HBA1C, 6.1);
        handler.handle(SubmitAssessmentCommand::new(first)).await.unwrap();
        handler.handle(SubmitAssessmentCommand::new(baseline())).await.unwrap();

        let calls = prediction.get_calls();
        assert_eq!(calls[0].input_data.get(codes::HBA1C), Some(FeatureValue::Decimal(6.1)));
        assert_eq!(calls[1].input_data.get(codes::HBA1C), None);
    }

    #[tokio::test]
    async fn outcomes_get_distinct_submission_ids() {
        let handler = handler(
            MockPredictionService::new(),
            Arc::new(InMemoryRecommendationSource::default()),
        );

        let a = handler.handle(SubmitAssessmentCommand::new(baseline())).await.unwrap();
        let b = handler.handle(SubmitAssessmentCommand::new(baseline())).await.unwrap();

        assert_ne!(a.submission_id, b.submission_id);
        assert!(a.display.is_empty());
    }
}

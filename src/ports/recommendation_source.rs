//! Recommendation Source Port - static fallback recommendation texts.

use async_trait::async_trait;

use crate::domain::prediction::RecommendationTable;

/// Port for loading the fallback factor → recommendation table.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Loads the table. A source that simply has no data returns an empty
    /// table rather than an error.
    async fn load(&self) -> Result<RecommendationTable, RecommendationSourceError>;
}

/// Recommendation source errors.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationSourceError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("malformed recommendations: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

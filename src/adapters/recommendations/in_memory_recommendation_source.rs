//! In-memory recommendation source, for tests and embedding.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::prediction::RecommendationTable;
use crate::ports::{RecommendationSource, RecommendationSourceError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryRecommendationSource {
    table: Arc<RwLock<RecommendationTable>>,
}

impl InMemoryRecommendationSource {
    pub fn new(table: RecommendationTable) -> Self {
        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }

    pub async fn insert(&self, code: impl Into<String>, text: impl Into<String>) {
        self.table.write().await.insert(code, text);
    }

    pub async fn clear(&self) {
        *self.table.write().await = RecommendationTable::new();
    }
}

#[async_trait]
impl RecommendationSource for InMemoryRecommendationSource {
    async fn load(&self) -> Result<RecommendationTable, RecommendationSourceError> {
        Ok(self.table.read().await.clone())
    }
}

//! Filesystem recommendation source.
//!
//! Reads a JSON object mapping factor codes to recommendation text. A
//! missing file is not an error: the application simply has no static
//! fallback and relies on the live response.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::prediction::RecommendationTable;
use crate::ports::{RecommendationSource, RecommendationSourceError};

pub struct FileRecommendationSource {
    path: PathBuf,
}

impl FileRecommendationSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecommendationSource for FileRecommendationSource {
    async fn load(&self) -> Result<RecommendationTable, RecommendationSourceError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    path = %self.path.display(),
                    "Recommendations file not found, continuing without fallback"
                );
                return Ok(RecommendationTable::new());
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return Err(RecommendationSourceError::PermissionDenied(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )));
            }
            Err(e) => {
                return Err(RecommendationSourceError::Io(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let table: RecommendationTable = serde_json::from_str(&content)
            .map_err(|e| RecommendationSourceError::Malformed(e.to_string()))?;

        debug!(path = %self.path.display(), entries = table.len(), "Loaded recommendations");
        Ok(table)
    }
}

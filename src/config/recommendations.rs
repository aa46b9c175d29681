//! Fallback recommendation configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Fallback recommendation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsConfig {
    /// JSON file mapping factor codes to recommendation text
    #[serde(default = "default_fallback_path")]
    pub fallback_path: PathBuf,
}

impl Default for RecommendationsConfig {
    fn default() -> Self {
        Self {
            fallback_path: default_fallback_path(),
        }
    }
}

fn default_fallback_path() -> PathBuf {
    PathBuf::from("factor_recommendations.json")
}

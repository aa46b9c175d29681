//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Variables carry the `HEALTH_RISK` prefix and nested
//! values are separated by double underscores. Every value has a default,
//! so an empty environment yields a usable configuration.
//!
//! # Example
//!
//! ```no_run
//! use health_risk_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Predicting against {}", config.prediction.endpoint());
//! ```

mod error;
mod prediction;
mod recommendations;
mod telemetry;

pub use error::{ConfigError, ValidationError};
pub use prediction::PredictionConfig;
pub use recommendations::RecommendationsConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Unprefixed variable older deployments use for the service origin.
pub const LEGACY_BASE_URL_VAR: &str = "API_BASE_URL";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Prediction service endpoint and timeout
    #[serde(default)]
    pub prediction: PredictionConfig,

    /// Static fallback recommendations
    #[serde(default)]
    pub recommendations: RecommendationsConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds `prediction.base_url` from `API_BASE_URL` when that is set
    /// 3. Reads environment variables with `HEALTH_RISK` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `HEALTH_RISK__PREDICTION__BASE_URL=...` -> `prediction.base_url = ...`
    /// - `HEALTH_RISK__TELEMETRY__JSON_LOGS=true` -> `telemetry.json_logs = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Ok(url) = std::env::var(LEGACY_BASE_URL_VAR) {
            builder = builder.set_default("prediction.base_url", url)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("HEALTH_RISK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.prediction.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var(LEGACY_BASE_URL_VAR);
        env::remove_var("HEALTH_RISK__PREDICTION__BASE_URL");
        env::remove_var("HEALTH_RISK__PREDICTION__TIMEOUT_SECS");
        env::remove_var("HEALTH_RISK__RECOMMENDATIONS__FALLBACK_PATH");
        env::remove_var("HEALTH_RISK__TELEMETRY__JSON_LOGS");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(
            config.prediction.base_url,
            "https://disease-warning-1.onrender.com"
        );
        assert_eq!(config.prediction.timeout_secs, 30);
        assert!(!config.telemetry.json_logs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prefixed_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("HEALTH_RISK__PREDICTION__BASE_URL", "http://localhost:8000");
        env::set_var("HEALTH_RISK__PREDICTION__TIMEOUT_SECS", "10");
        env::set_var("HEALTH_RISK__RECOMMENDATIONS__FALLBACK_PATH", "/etc/recs.json");
        env::set_var("HEALTH_RISK__TELEMETRY__JSON_LOGS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.prediction.base_url, "http://localhost:8000");
        assert_eq!(config.prediction.timeout_secs, 10);
        assert_eq!(
            config.recommendations.fallback_path,
            std::path::PathBuf::from("/etc/recs.json")
        );
        assert!(config.telemetry.json_logs);
    }

    #[test]
    fn test_legacy_base_url_variable() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(LEGACY_BASE_URL_VAR, "http://legacy.internal:9000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.prediction.base_url, "http://legacy.internal:9000");
        assert_eq!(config.prediction.predict_path, "/prediction/all");
    }

    #[test]
    fn test_prefixed_variable_beats_legacy() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(LEGACY_BASE_URL_VAR, "http://legacy.internal:9000");
        env::set_var("HEALTH_RISK__PREDICTION__BASE_URL", "http://current.internal");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().prediction.base_url, "http://current.internal");
    }

    #[test]
    fn test_invalid_timeout_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("HEALTH_RISK__PREDICTION__TIMEOUT_SECS", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTimeout)
        ));
    }
}

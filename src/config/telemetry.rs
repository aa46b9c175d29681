//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable output
    #[serde(default)]
    pub json_logs: bool,
}

impl TelemetryConfig {
    /// Build the tracing filter, letting `RUST_LOG` take precedence
    pub fn env_filter(&self) -> Result<EnvFilter, ValidationError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.log_level)
                .map_err(|e| ValidationError::InvalidLogFilter(e.to_string())),
        }
    }

    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.log_level)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_log_level() -> String {
    "info,health_risk_intake=debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_valid() {
        assert!(TelemetryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_filter() {
        let config = TelemetryConfig {
            log_level: "health_risk_intake=loud".to_string(),
            json_logs: false,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogFilter(_))
        ));
    }
}

//! Application Configuration
//!
//! Layered as built-in defaults, then a TOML file, then `RISK__*`
//! environment variables (`RISK__SERVER__BIND_ADDR`, `RISK__LOGGING__LEVEL`, ...).

use crate::rate_limit::RateLimitConfig;
use crate::ApiError;
use config::{Config, Environment, File};
use inference_engine::{ArtifactPaths, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

/// Config file read when no explicit path is given (extension optional)
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

/// Risk threshold settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Positive-class probability above which a result is High Risk
    pub threshold: f64,
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl LoggingConfig {
    /// Parsed maximum level
    pub fn max_level(&self) -> Result<Level, ApiError> {
        self.level
            .parse()
            .map_err(|_| ApiError::InvalidConfig(format!("unknown log level {:?}", self.level)))
    }
}

/// Prometheus exporter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub artifacts: ArtifactPaths,
    pub classification: ClassificationConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_addr: "0.0.0.0:8080".to_string(),
            },
            artifacts: ArtifactPaths::default(),
            classification: ClassificationConfig {
                threshold: DEFAULT_THRESHOLD,
            },
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                json: false,
            },
            metrics: MetricsConfig { enabled: true },
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist; otherwise `config/default.*` is used
    /// when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ApiError> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: AppConfig = Self::defaults()?
            .add_source(file)
            .add_source(Environment::with_prefix("RISK").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ApiError> {
        let d = AppConfig::default();
        Ok(Config::builder()
            .set_default("server.bind_addr", d.server.bind_addr)?
            .set_default(
                "artifacts.scaler_path",
                d.artifacts.scaler_path.display().to_string(),
            )?
            .set_default(
                "artifacts.model_path",
                d.artifacts.model_path.display().to_string(),
            )?
            .set_default("classification.threshold", d.classification.threshold)?
            .set_default("rate_limit.per_second", d.rate_limit.per_second as i64)?
            .set_default("rate_limit.burst_size", i64::from(d.rate_limit.burst_size))?
            .set_default("logging.level", d.logging.level)?
            .set_default("logging.json", d.logging.json)?
            .set_default("metrics.enabled", d.metrics.enabled)?)
    }

    /// Reject settings that would only fail later at runtime
    pub fn validate(&self) -> Result<(), ApiError> {
        self.logging.max_level()?;

        let t = self.classification.threshold;
        if !(t > 0.0 && t < 1.0) {
            return Err(ApiError::InvalidConfig(format!(
                "classification.threshold {} must lie strictly between 0 and 1",
                t
            )));
        }
        if self.rate_limit.per_second == 0 || self.rate_limit.burst_size == 0 {
            return Err(ApiError::InvalidConfig(
                "rate_limit.per_second and rate_limit.burst_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.classification.threshold, 0.5);
        assert_eq!(config.artifacts.model_path, PathBuf::from("models/diabetes_model.json"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.server.bind_addr, AppConfig::default().server.bind_addr);
        assert_eq!(config.rate_limit.burst_size, RateLimitConfig::default().burst_size);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/risk.toml"))).is_err());
    }

    #[test]
    fn test_rejects_bad_threshold_and_level() {
        let mut config = AppConfig::default();
        config.classification.threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}

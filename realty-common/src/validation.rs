//! Configuration validation for realty services.
//!
//! Provides validation logic for configuration fields to ensure
//! all values are within valid ranges before a service starts.

use thiserror::Error;

use crate::config::{Config, ObservabilityConfig, ServiceConfig, ValuationSettings};
use crate::logging::LogFormat;

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port {port}: must be between 1 and 65535")]
    InvalidPort { port: u16, field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

impl Config {
    /// Validate the entire configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.service.validate() {
            errors.push(e);
        }

        if let Err(e) = self.observability.validate() {
            errors.push(e);
        }

        if let Err(e) = self.valuation.validate() {
            errors.push(e);
        }

        if self.network.bind.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                field: "network.bind".into(),
                reason: "must not be empty".into(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(ValidationError::Multiple(errors))
        }
    }

    /// Load (with environment overrides) and validate configuration.
    pub fn load_and_validate() -> anyhow::Result<Self> {
        let config = Self::load_with_env()?;
        config.validate().map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(config)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(0) = self.port {
            return Err(ValidationError::InvalidPort {
                port: 0,
                field: "service.port".into(),
            });
        }
        Ok(())
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        if self.log_format.parse::<LogFormat>().is_err() {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("must be one of: {}", LogFormat::NAMES.join(", ")),
            });
        }

        Ok(())
    }
}

impl Validate for ValuationSettings {
    fn validate(&self) -> ValidationResult<()> {
        if self.currency.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "valuation.currency".into(),
                reason: "must not be empty".into(),
            });
        }

        for (field, path) in [
            ("valuation.estimator_path", &self.estimator_path),
            ("valuation.dataset_path", &self.dataset_path),
        ] {
            if matches!(path.as_deref(), Some(p) if p.trim().is_empty()) {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    reason: "must not be empty when set".into(),
                });
            }
        }

        Ok(())
    }
}

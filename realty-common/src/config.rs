//! Configuration management for realty services.
//!
//! Services share a single configuration file at `~/.realty/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Environment variables (REALTY_* prefix)
//! 2. Explicit config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `REALTY_BIND_ADDRESS` → network.bind
//! - `REALTY_PORT` → service.port
//! - `REALTY_LOG_LEVEL` → observability.log_level
//! - `REALTY_LOG_FORMAT` → observability.log_format
//! - `REALTY_ESTIMATOR_PATH` → valuation.estimator_path
//! - `REALTY_DATASET_PATH` → valuation.dataset_path
//! - `REALTY_CURRENCY` → valuation.currency

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".realty"),
        |dirs| dirs.home_dir().join(".realty"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Expand `~` and environment variables in a configured path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::full(raw).map_or_else(|_| raw.to_string(), |p| p.into_owned()))
}

// ============================================================================
// Network Configuration
// ============================================================================

/// Network configuration.
///
/// Default bind address is `127.0.0.1` (local only).
/// Set to `0.0.0.0` to allow remote access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_bind_address")]
    pub bind: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".into()
}

/// HTTP service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    /// Listen port (default 4480)
    #[serde(default)]
    pub port: Option<u16>,
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,

    /// Additional module targets to force to `warn`.
    ///
    /// Built-in noisy modules (hyper, h2, tower_http) are always filtered;
    /// this list adds to them.
    #[serde(default)]
    pub excluded_targets: Vec<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            excluded_targets: Vec::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Valuation Configuration
// ============================================================================

/// Valuation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationSettings {
    /// Currency label used in formatted amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Path to a serialized price model (optional)
    #[serde(default)]
    pub estimator_path: Option<String>,

    /// Path to a historical listings dataset (optional)
    #[serde(default)]
    pub dataset_path: Option<String>,

    /// Reject requests outside the form ranges (bedrooms 1-7, area 500-15000, ...)
    #[serde(default)]
    pub enforce_form_ranges: bool,

    /// Load the estimator and dataset at start-up instead of on first use
    #[serde(default = "default_true")]
    pub preload: bool,
}

impl Default for ValuationSettings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            estimator_path: None,
            dataset_path: None,
            enforce_form_ranges: false,
            preload: true,
        }
    }
}

impl ValuationSettings {
    /// Resolved estimator path, with `~` expanded.
    pub fn estimator_path(&self) -> Option<PathBuf> {
        self.estimator_path.as_deref().map(expand_path)
    }

    /// Resolved dataset path, with `~` expanded.
    pub fn dataset_path(&self) -> Option<PathBuf> {
        self.dataset_path.as_deref().map(expand_path)
    }
}

fn default_currency() -> String {
    "AED".into()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// JSON Schema reference
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub valuation: ValuationSettings,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration with environment variable overrides applied.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// `apply_env_overrides` delegates here with `std::env::var`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("REALTY_BIND_ADDRESS") {
            self.network.bind = bind;
        }
        if let Some(port) = lookup("REALTY_PORT") {
            match port.parse() {
                Ok(p) => self.service.port = Some(p),
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid REALTY_PORT"),
            }
        }
        if let Some(level) = lookup("REALTY_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("REALTY_LOG_FORMAT") {
            self.observability.log_format = format;
        }
        if let Some(path) = lookup("REALTY_ESTIMATOR_PATH") {
            self.valuation.estimator_path = Some(path);
        }
        if let Some(path) = lookup("REALTY_DATASET_PATH") {
            self.valuation.dataset_path = Some(path);
        }
        if let Some(currency) = lookup("REALTY_CURRENCY") {
            self.valuation.currency = currency;
        }
    }

    /// Get the effective bind address.
    pub fn bind_address(&self) -> &str {
        &self.network.bind
    }

    /// Get the effective service port.
    pub fn service_port(&self) -> u16 {
        self.service.port.unwrap_or(4480)
    }

    /// Get the service endpoint URL.
    pub fn service_endpoint(&self) -> String {
        format!("http://{}:{}", self.bind_address(), self.service_port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service_port(), 4480);
        assert_eq!(config.bind_address(), "127.0.0.1");
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.observability.log_format, "pretty");
        assert_eq!(config.valuation.currency, "AED");
        assert!(config.valuation.preload);
        assert!(!config.valuation.enforce_form_ranges);
        assert!(config.valuation.estimator_path.is_none());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json = r#"{
            "service": { "port": 9000 },
            "valuation": { "dataset_path": "/data/listings.json" }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.service_port(), 9000);
        assert_eq!(config.valuation.currency, "AED");
        assert_eq!(
            config.valuation.dataset_path(),
            Some(PathBuf::from("/data/listings.json"))
        );
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_observability_aliases() {
        let json = r#"{ "observability": { "level": "debug", "format": "json" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.observability.log_format, "json");
    }

    #[test]
    fn test_apply_overrides() {
        let vars: HashMap<&str, &str> = [
            ("REALTY_PORT", "5000"),
            ("REALTY_BIND_ADDRESS", "0.0.0.0"),
            ("REALTY_CURRENCY", "USD"),
            ("REALTY_ESTIMATOR_PATH", "/models/price.json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.service_port(), 5000);
        assert_eq!(config.bind_address(), "0.0.0.0");
        assert_eq!(config.valuation.currency, "USD");
        assert_eq!(
            config.valuation.estimator_path.as_deref(),
            Some("/models/price.json")
        );
        assert_eq!(config.service_endpoint(), "http://0.0.0.0:5000");
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "REALTY_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.service_port(), 4480);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "valuation": {{ "currency": "EUR", "preload": false }} }}"#).unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.valuation.currency, "EUR");
        assert!(!config.valuation.preload);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}

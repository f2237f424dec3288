//! Realty Common - Shared configuration, errors, and logging for realty services.
//!
//! This crate provides:
//! - Configuration types and loading with environment overrides
//! - Configuration validation
//! - Error types and context helpers
//! - Logging setup and request tracing context

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::{Config, NetworkConfig, ObservabilityConfig, ServiceConfig, ValuationSettings};
pub use error::{Error, Result, ResultExt};
pub use validation::{Validate, ValidationError, ValidationResult};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result, ResultExt};
    pub use crate::logging::{init_from_config, RequestContext};
    pub use crate::validation::{Validate, ValidationError};
}

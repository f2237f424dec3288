//! Realty Valuation Library
//!
//! Estimates residential property prices from a handful of attributes and
//! serves the estimates over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  realty-valuation (Rust Service)                    │
//! │                           :4480                                     │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐      │
//! │  │  Formula        │  │  Price Model    │  │  Market         │      │
//! │  │  Engine         │  │  (lazy slot)    │  │  Dataset (slot) │      │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘      │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐      │
//! │  │  Comparison     │  │  Insights       │  │  Display        │      │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Concepts
//!
//! ## Formula estimate
//! - Always available, deterministic, never fails for a positive area
//! - Unknown locations and property types fall back to a 1.0 multiplier
//!
//! ## Model estimate
//! - Loaded once from disk on first use, the outcome is cached
//! - A missing or broken model answers 503 instead of guessing
//!
//! ## Market statistics
//! - Mean listing price per location and per property type
//! - Same load-once behavior as the model

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod compare;
pub mod error;
pub mod estimator;
pub mod format;
pub mod insights;
pub mod market;
pub mod resource;
pub mod routes;
pub mod valuation;

use anyhow::Result;
use tower_http::cors::{Any, CorsLayer};

use realty_common::config::Config;

pub use compare::{compare_properties, Comparison};
pub use error::ValuationError;
pub use estimator::{FeatureRecord, PriceEstimator, Quality};
pub use market::MarketStats;
pub use resource::{Availability, ResourceSlot, SlotStatus};
pub use routes::{build_router, AppState};
pub use valuation::{PriceEstimate, PropertyRequest, ValuationEngine};

/// Main valuation service
pub struct ValuationService {
    config: Config,
    state: AppState,
}

impl ValuationService {
    /// Create a new valuation service
    pub fn new(config: Config) -> Self {
        let state = AppState::new(&config.valuation);
        Self { config, state }
    }

    /// Shared state handed to the router
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Start the valuation service
    pub async fn start(self) -> Result<()> {
        if self.config.valuation.preload {
            self.state.preload().await;
        }

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = build_router(self.state).layer(cors);

        let addr = format!(
            "{}:{}",
            self.config.bind_address(),
            self.config.service_port()
        );
        tracing::info!(
            endpoint = %self.config.service_endpoint(),
            "Starting HTTP server on {}",
            addr
        );

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Valuation service stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

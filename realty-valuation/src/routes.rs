//! HTTP API routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use realty_common::config::ValuationSettings;
use realty_common::logging::RequestContext;

use crate::compare::compare_properties;
use crate::error::ValuationError;
use crate::estimator::{load_estimator, PriceEstimator};
use crate::format::{EstimateDisplay, PropertySummary};
use crate::insights::{location_insights, size_insights, type_insights};
use crate::market::{load_market_stats, MarketStats};
use crate::resource::{Availability, ResourceSlot};
use crate::valuation::{
    breakdown, investment_metrics, MultiplierTable, PriceEstimate, PropertyRequest,
    ValuationEngine,
};

const SERVICE_NAME: &str = "realty-valuation";

/// Shared estimator handle.
pub type EstimatorSlot = ResourceSlot<Arc<dyn PriceEstimator>>;
/// Shared market statistics handle.
pub type MarketSlot = ResourceSlot<MarketStats>;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: ValuationEngine,
    pub estimator: Arc<EstimatorSlot>,
    pub market: Arc<MarketSlot>,
    pub currency: String,
    pub enforce_form_ranges: bool,
}

impl AppState {
    /// State with collaborators loaded lazily from the configured paths.
    pub fn new(settings: &ValuationSettings) -> Self {
        Self {
            engine: ValuationEngine::new(),
            estimator: Arc::new(ResourceSlot::new(
                "price model",
                settings.estimator_path(),
                load_estimator,
            )),
            market: Arc::new(ResourceSlot::new(
                "market dataset",
                settings.dataset_path(),
                load_market_stats,
            )),
            currency: settings.currency.clone(),
            enforce_form_ranges: settings.enforce_form_ranges,
        }
    }

    /// Replace the estimator with an already loaded one.
    pub fn with_estimator(mut self, estimator: Arc<dyn PriceEstimator>) -> Self {
        self.estimator = Arc::new(ResourceSlot::ready("price model", estimator, load_estimator));
        self
    }

    /// Replace the market statistics with already computed ones.
    pub fn with_market_stats(mut self, stats: MarketStats) -> Self {
        self.market = Arc::new(ResourceSlot::ready("market dataset", stats, load_market_stats));
        self
    }

    /// Load both collaborators now instead of on first request.
    pub async fn preload(&self) {
        let estimator = self.estimator.get().await;
        let market = self.market.get().await;
        tracing::info!(
            estimator = estimator.is_available(),
            market = market.is_available(),
            "Collaborators preloaded"
        );
    }

    fn check(&self, request: &PropertyRequest) -> Result<(), ValuationError> {
        if self.enforce_form_ranges {
            request.validate_form_ranges()
        } else {
            request.validate()
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Valuation
        .route("/api/v1/estimate", post(estimate))
        .route("/api/v1/estimate/model", post(estimate_with_model))
        .route("/api/v1/breakdown", post(price_breakdown))
        .route("/api/v1/metrics", post(price_metrics))
        .route("/api/v1/compare", post(compare))
        // Insights
        .route("/api/v1/insights/locations", get(insights_locations))
        .route("/api/v1/insights/types", get(insights_types))
        .route("/api/v1/insights/sizes", get(insights_sizes))
        .route("/api/v1/market/stats", get(market_stats))
        .route("/api/v1/tables", get(tables))
        .with_state(state)
}

fn ok<T: Serialize>(data: T) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "data": data
    }))
}

// ============ Health Check ============

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "estimator": state.estimator.status(),
        "market": state.market.status(),
    }))
}

// ============ Valuation ============

#[derive(Debug, Serialize)]
struct EstimateResponse {
    estimate: PriceEstimate,
    display: EstimateDisplay,
    summary: PropertySummary,
}

impl EstimateResponse {
    fn new(currency: &str, request: &PropertyRequest, estimate: PriceEstimate) -> Self {
        Self {
            display: EstimateDisplay::new(currency, &estimate),
            summary: PropertySummary::from_request(request),
            estimate,
        }
    }
}

async fn estimate(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PropertyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ValuationError> {
    let Json(request) = payload?;
    let ctx = RequestContext::from_headers(&headers, SERVICE_NAME);
    state.check(&request)?;

    let estimate = state.engine.try_estimate_price(&request)?;
    tracing::info!(
        trace_id = %ctx.trace_id,
        location = %request.location,
        predicted_price = estimate.predicted_price,
        "Formula estimate served"
    );

    Ok(ok(EstimateResponse::new(&state.currency, &request, estimate)))
}

async fn estimate_with_model(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PropertyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ValuationError> {
    let Json(request) = payload?;
    let ctx = RequestContext::from_headers(&headers, SERVICE_NAME);
    state.check(&request)?;

    let estimator = match state.estimator.get().await {
        Availability::Available(estimator) => Arc::clone(estimator),
        Availability::Unavailable(reason) => {
            tracing::warn!(trace_id = %ctx.trace_id, reason = %reason, "Model estimate refused");
            return Err(ValuationError::EstimationUnavailable(reason.clone()));
        }
    };

    let estimate = state
        .engine
        .estimate_with_model(estimator.as_ref(), &request)?;
    tracing::info!(
        trace_id = %ctx.trace_id,
        estimator = estimator.name(),
        predicted_price = estimate.predicted_price,
        "Model estimate served"
    );

    Ok(ok(EstimateResponse::new(&state.currency, &request, estimate)))
}

#[derive(Debug, Deserialize)]
struct PriceRequest {
    predicted_price: f64,
}

impl PriceRequest {
    fn price(&self) -> Result<f64, ValuationError> {
        if !self.predicted_price.is_finite() || self.predicted_price <= 0.0 {
            return Err(ValuationError::InvalidRequest(format!(
                "predicted_price must be a positive number, got {}",
                self.predicted_price
            )));
        }
        Ok(self.predicted_price)
    }
}

async fn price_breakdown(
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ValuationError> {
    let Json(request) = payload?;
    Ok(ok(breakdown(request.price()?)))
}

async fn price_metrics(
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ValuationError> {
    let Json(request) = payload?;
    Ok(ok(investment_metrics(request.price()?)))
}

#[derive(Debug, Deserialize)]
struct CompareRequest {
    properties: Vec<PropertyRequest>,
}

async fn compare(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ValuationError> {
    let Json(request) = payload?;
    if state.enforce_form_ranges {
        for (i, property) in request.properties.iter().enumerate() {
            property.validate_form_ranges().map_err(|e| {
                ValuationError::InvalidRequest(format!("property {}: {e}", i + 1))
            })?;
        }
    }

    let comparison = compare_properties(&state.engine, &request.properties)?;
    Ok(ok(comparison))
}

// ============ Insights ============

async fn insights_locations(State(state): State<AppState>) -> impl IntoResponse {
    ok(location_insights(&state.engine))
}

async fn insights_types(State(state): State<AppState>) -> impl IntoResponse {
    ok(type_insights(&state.engine))
}

async fn insights_sizes(State(state): State<AppState>) -> impl IntoResponse {
    ok(size_insights(&state.engine))
}

async fn market_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ValuationError> {
    match state.market.get().await {
        Availability::Available(stats) => Ok(ok(stats)),
        Availability::Unavailable(reason) => {
            Err(ValuationError::DatasetUnavailable(reason.clone()))
        }
    }
}

#[derive(Debug, Serialize)]
struct TableEntry {
    name: &'static str,
    multiplier: f64,
}

async fn tables(State(state): State<AppState>) -> impl IntoResponse {
    let entries = |table: &MultiplierTable| -> Vec<TableEntry> {
        table
            .entries()
            .iter()
            .map(|&(name, multiplier)| TableEntry { name, multiplier })
            .collect()
    };

    ok(serde_json::json!({
        "locations": entries(state.engine.locations()),
        "property_types": entries(state.engine.property_types()),
        "default_multiplier": state.engine.locations().default_multiplier(),
    }))
}

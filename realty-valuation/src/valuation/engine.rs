//! Valuation Engine.
//!
//! Computes a property price from the multiplier formula, or from a
//! pre-trained estimator, and derives range, breakdown and investment
//! metrics from it.

use super::tables::{MultiplierTable, LOCATION_MULTIPLIERS, PROPERTY_TYPE_MULTIPLIERS};
use super::types::*;
use crate::error::ValuationError;
use crate::estimator::{FeatureRecord, PriceEstimator};

/// Price of the reference property before any multiplier.
pub const BASE_PRICE: f64 = 1_000_000.0;
/// Area (sqft) at which the size factor is 1.0.
pub const REFERENCE_AREA: f64 = 1500.0;
/// Layout factor added per bedroom.
pub const BEDROOM_WEIGHT: f64 = 0.3;
/// Layout factor with zero bedrooms.
pub const LAYOUT_BASE: f64 = 0.7;
/// Lower bound of the price range, as a fraction of the price.
pub const LOWER_BOUND_RATIO: f64 = 0.9;
/// Upper bound of the price range, as a fraction of the price.
pub const UPPER_BOUND_RATIO: f64 = 1.10;
/// Monthly rent as a fraction of the price (about 5% a year).
pub const MONTHLY_RENT_RATIO: f64 = 0.00417;
/// Assumed annual rental yield, in percent.
pub const ANNUAL_YIELD_PCT: f64 = 5.0;

/// Stateless valuation engine over the static multiplier tables.
///
/// Cheap to construct and safe to share between threads.
#[derive(Debug, Clone, Copy)]
pub struct ValuationEngine {
    locations: &'static MultiplierTable,
    property_types: &'static MultiplierTable,
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValuationEngine {
    pub fn new() -> Self {
        Self {
            locations: &LOCATION_MULTIPLIERS,
            property_types: &PROPERTY_TYPE_MULTIPLIERS,
        }
    }

    pub fn locations(&self) -> &MultiplierTable {
        self.locations
    }

    pub fn property_types(&self) -> &MultiplierTable {
        self.property_types
    }

    /// Resolve the formula factors for a request.
    pub fn factors(&self, request: &PropertyRequest) -> ValuationFactors {
        let amenity_bonus = request
            .amenities()
            .into_iter()
            .fold(0.0, |bonus, amenity| bonus + amenity.bonus());

        ValuationFactors {
            base_price: BASE_PRICE,
            location_multiplier: self.locations.lookup(&request.location),
            type_multiplier: self.property_types.lookup(&request.property_type),
            size_factor: request.area / REFERENCE_AREA,
            layout_factor: f64::from(request.bedrooms) * BEDROOM_WEIGHT + LAYOUT_BASE,
            amenity_bonus,
        }
    }

    /// Estimate a price with the multiplier formula.
    ///
    /// Never fails. `request.area` must be positive for `price_per_area`
    /// to be meaningful; callers validate that beforehand.
    pub fn estimate_price(&self, request: &PropertyRequest) -> PriceEstimate {
        let factors = self.factors(request);
        let predicted_price = factors.predicted_price();

        tracing::debug!(
            location = %request.location,
            property_type = %request.property_type,
            area = request.area,
            predicted_price,
            "Formula estimate computed"
        );

        derive_estimate(
            predicted_price,
            request.area,
            Some(factors),
            EstimateSource::Formula,
        )
    }

    /// Validate the request and estimate it with the formula.
    ///
    /// An area that pushes the product out of the finite positive range is
    /// rejected rather than served as an infinite price.
    pub fn try_estimate_price(
        &self,
        request: &PropertyRequest,
    ) -> Result<PriceEstimate, ValuationError> {
        request.validate()?;

        let estimate = self.estimate_price(request);
        if !estimate.predicted_price.is_finite() || estimate.predicted_price <= 0.0 {
            return Err(ValuationError::InvalidRequest(format!(
                "area {} gives no representable price",
                request.area
            )));
        }
        Ok(estimate)
    }

    /// Estimate a price by delegating to a pre-trained estimator.
    ///
    /// Any estimator failure, or a non-finite or non-positive prediction,
    /// is reported as [`ValuationError::EstimationUnavailable`].
    pub fn estimate_with_model(
        &self,
        estimator: &dyn PriceEstimator,
        request: &PropertyRequest,
    ) -> Result<PriceEstimate, ValuationError> {
        let features = FeatureRecord::from_request(request);

        let predicted_price = estimator.predict(&features).map_err(|e| {
            tracing::warn!(estimator = estimator.name(), error = %e, "Estimator predict failed");
            ValuationError::EstimationUnavailable(format!("{} failed: {e}", estimator.name()))
        })?;

        if !predicted_price.is_finite() || predicted_price <= 0.0 {
            tracing::warn!(
                estimator = estimator.name(),
                predicted_price,
                "Estimator returned an unusable price"
            );
            return Err(ValuationError::EstimationUnavailable(format!(
                "{} returned an unusable price: {predicted_price}",
                estimator.name()
            )));
        }

        tracing::debug!(
            estimator = estimator.name(),
            quality = %features.quality,
            predicted_price,
            "Model estimate computed"
        );

        Ok(derive_estimate(
            predicted_price,
            request.area,
            None,
            EstimateSource::Model,
        ))
    }
}

/// Estimate a price with the default engine.
pub fn estimate_price(request: &PropertyRequest) -> PriceEstimate {
    ValuationEngine::new().estimate_price(request)
}

fn derive_estimate(
    predicted_price: f64,
    area: f64,
    factors: Option<ValuationFactors>,
    source: EstimateSource,
) -> PriceEstimate {
    let range = price_range(predicted_price);
    let metrics = investment_metrics(predicted_price);

    PriceEstimate {
        predicted_price,
        price_per_area: predicted_price / area,
        lower_bound: range.lower,
        upper_bound: range.upper,
        breakdown: breakdown(predicted_price),
        monthly_rent_estimate: metrics.monthly_rent,
        annual_yield: metrics.annual_yield,
        roi_years: metrics.roi_years,
        factors,
        source,
    }
}

/// Split a price into the fixed 50/25/15/10 display breakdown.
pub fn breakdown(predicted_price: f64) -> PriceBreakdown {
    let items = BreakdownComponent::ALL
        .into_iter()
        .map(|component| {
            let value = predicted_price * component.share();
            let percentage = if predicted_price != 0.0 {
                value / predicted_price * 100.0
            } else {
                component.share() * 100.0
            };
            BreakdownItem {
                component,
                value,
                percentage,
            }
        })
        .collect();

    PriceBreakdown { items }
}

/// Rent, yield and payback period for a price.
pub fn investment_metrics(predicted_price: f64) -> InvestmentMetrics {
    InvestmentMetrics {
        monthly_rent: predicted_price * MONTHLY_RENT_RATIO,
        annual_yield: ANNUAL_YIELD_PCT,
        roi_years: 100.0 / ANNUAL_YIELD_PCT,
    }
}

/// Estimated price range (-10% / +10%).
pub fn price_range(predicted_price: f64) -> PriceRange {
    PriceRange {
        lower: predicted_price * LOWER_BOUND_RATIO,
        upper: predicted_price * UPPER_BOUND_RATIO,
    }
}

// ============================================================================
// Tests
// ============================================================================

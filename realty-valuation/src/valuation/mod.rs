//! Property Valuation Module.
//!
//! Estimates a property price from its attributes with a deterministic
//! multiplier formula:
//!
//! ```text
//! price = 1,000,000
//!       × location multiplier
//!       × property type multiplier
//!       × (area / 1500)
//!       × (bedrooms × 0.3 + 0.7)
//!       × (1 + amenity bonus)
//! ```
//!
//! Unknown locations and property types resolve to a multiplier of 1.0.
//! The resulting price is decorated with a ±10% range, a fixed-ratio
//! breakdown and rental metrics.
//!
//! # Usage
//!
//! ```ignore
//! use realty_valuation::valuation::{PropertyRequest, ValuationEngine};
//!
//! let engine = ValuationEngine::new();
//! let request = PropertyRequest::new("Dubai Marina", "Apartment", 2, 1500.0)
//!     .with_all_amenities();
//!
//! let estimate = engine.estimate_price(&request);
//! println!("Price per sqft: {:.0}", estimate.price_per_area);
//! ```

pub mod engine;
pub mod tables;
pub mod types;

pub use engine::{
    breakdown, estimate_price, investment_metrics, price_range, ValuationEngine, BASE_PRICE,
    REFERENCE_AREA,
};
pub use tables::{MultiplierTable, LOCATION_MULTIPLIERS, PROPERTY_TYPE_MULTIPLIERS};
pub use types::{
    Amenity, BreakdownComponent, BreakdownItem, EstimateSource, InvestmentMetrics,
    PriceBreakdown, PriceEstimate, PriceRange, PropertyRequest, ValuationFactors,
};

//! Valuation Types.
//!
//! Request and result records for the property valuation engine.

use serde::{Deserialize, Serialize};

use crate::error::ValuationError;

// ============================================================================
// Form ranges
// ============================================================================

/// Inclusive bedroom range offered by the input form.
pub const FORM_BEDROOMS: (u32, u32) = (1, 7);
/// Inclusive bathroom range offered by the input form.
pub const FORM_BATHROOMS: (u32, u32) = (1, 7);
/// Inclusive area range (sqft) offered by the input form.
pub const FORM_AREA: (f64, f64) = (500.0, 15_000.0);
/// Inclusive parking range offered by the input form.
pub const FORM_PARKING: (u32, u32) = (0, 5);

// ============================================================================
// Amenities
// ============================================================================

/// Optional amenity, each adding an independent fractional premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Pool,
    Gym,
    Security,
    Balcony,
}

impl Amenity {
    /// All amenities, in the order their bonuses are accumulated.
    pub const ALL: [Amenity; 4] = [Self::Pool, Self::Gym, Self::Security, Self::Balcony];

    /// Additive bonus applied as `(1 + bonus)`.
    pub const fn bonus(self) -> f64 {
        match self {
            Self::Pool => 0.05,
            Self::Gym => 0.03,
            Self::Security => 0.02,
            Self::Balcony => 0.02,
        }
    }
}

impl std::fmt::Display for Amenity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pool => write!(f, "Pool"),
            Self::Gym => write!(f, "Gym"),
            Self::Security => write!(f, "Security"),
            Self::Balcony => write!(f, "Balcony"),
        }
    }
}

// ============================================================================
// Input Types
// ============================================================================

/// Property attributes submitted for valuation.
///
/// `bathrooms` and `parking` are carried for display only; the formula
/// ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRequest {
    /// Location name, e.g. "Dubai Marina"
    pub location: String,
    /// Property type name, e.g. "Villa"
    pub property_type: String,
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    /// Floor area in square feet
    pub area: f64,
    #[serde(default)]
    pub parking: u32,
    #[serde(default)]
    pub has_pool: bool,
    #[serde(default)]
    pub has_gym: bool,
    #[serde(default)]
    pub has_security: bool,
    #[serde(default)]
    pub has_balcony: bool,
}

impl PropertyRequest {
    /// Create a request with no amenities, bathrooms equal to bedrooms and one parking space.
    pub fn new(
        location: impl Into<String>,
        property_type: impl Into<String>,
        bedrooms: u32,
        area: f64,
    ) -> Self {
        Self {
            location: location.into(),
            property_type: property_type.into(),
            bedrooms,
            bathrooms: bedrooms,
            area,
            parking: 1,
            has_pool: false,
            has_gym: false,
            has_security: false,
            has_balcony: false,
        }
    }

    pub fn with_bathrooms(mut self, bathrooms: u32) -> Self {
        self.bathrooms = bathrooms;
        self
    }

    pub fn with_parking(mut self, parking: u32) -> Self {
        self.parking = parking;
        self
    }

    /// Set or clear a single amenity.
    pub fn with_amenity(mut self, amenity: Amenity, present: bool) -> Self {
        match amenity {
            Amenity::Pool => self.has_pool = present,
            Amenity::Gym => self.has_gym = present,
            Amenity::Security => self.has_security = present,
            Amenity::Balcony => self.has_balcony = present,
        }
        self
    }

    /// Enable every amenity.
    pub fn with_all_amenities(self) -> Self {
        Amenity::ALL
            .into_iter()
            .fold(self, |request, amenity| request.with_amenity(amenity, true))
    }

    pub fn has(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::Pool => self.has_pool,
            Amenity::Gym => self.has_gym,
            Amenity::Security => self.has_security,
            Amenity::Balcony => self.has_balcony,
        }
    }

    /// Selected amenities, in accumulation order.
    pub fn amenities(&self) -> Vec<Amenity> {
        Amenity::ALL.into_iter().filter(|a| self.has(*a)).collect()
    }

    /// Check the engine precondition: a finite, positive area.
    pub fn validate(&self) -> Result<(), ValuationError> {
        if !self.area.is_finite() || self.area <= 0.0 {
            return Err(ValuationError::InvalidRequest(format!(
                "area must be a positive number, got {}",
                self.area
            )));
        }
        Ok(())
    }

    /// Check the precondition plus the ranges offered by the input form.
    pub fn validate_form_ranges(&self) -> Result<(), ValuationError> {
        self.validate()?;

        let counts = [
            ("bedrooms", self.bedrooms, FORM_BEDROOMS),
            ("bathrooms", self.bathrooms, FORM_BATHROOMS),
            ("parking", self.parking, FORM_PARKING),
        ];
        for (field, value, (min, max)) in counts {
            if value < min || value > max {
                return Err(ValuationError::InvalidRequest(format!(
                    "{field} must be between {min} and {max}, got {value}"
                )));
            }
        }

        let (min_area, max_area) = FORM_AREA;
        if self.area < min_area || self.area > max_area {
            return Err(ValuationError::InvalidRequest(format!(
                "area must be between {min_area} and {max_area} sqft, got {}",
                self.area
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Which path produced a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    /// Deterministic multiplier formula
    Formula,
    /// Pre-trained estimator
    Model,
}

impl std::fmt::Display for EstimateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Formula => write!(f, "formula"),
            Self::Model => write!(f, "model"),
        }
    }
}

/// Intermediate factors of the valuation formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationFactors {
    pub base_price: f64,
    pub location_multiplier: f64,
    pub type_multiplier: f64,
    pub size_factor: f64,
    pub layout_factor: f64,
    pub amenity_bonus: f64,
}

impl ValuationFactors {
    /// Price before the amenity premium is applied.
    pub fn base_product(&self) -> f64 {
        self.base_price
            * self.location_multiplier
            * self.type_multiplier
            * self.size_factor
            * self.layout_factor
    }

    /// Final formula price.
    pub fn predicted_price(&self) -> f64 {
        self.base_product() * (1.0 + self.amenity_bonus)
    }
}

/// Named share of the fixed-ratio price breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownComponent {
    BasePrice,
    LocationPremium,
    SizeAndLayout,
    Amenities,
}

impl BreakdownComponent {
    /// Components in display order.
    pub const ALL: [BreakdownComponent; 4] = [
        Self::BasePrice,
        Self::LocationPremium,
        Self::SizeAndLayout,
        Self::Amenities,
    ];

    /// Fraction of the total price attributed to this component.
    pub const fn share(self) -> f64 {
        match self {
            Self::BasePrice => 0.50,
            Self::LocationPremium => 0.25,
            Self::SizeAndLayout => 0.15,
            Self::Amenities => 0.10,
        }
    }
}

impl std::fmt::Display for BreakdownComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BasePrice => write!(f, "Base Price"),
            Self::LocationPremium => write!(f, "Location Premium"),
            Self::SizeAndLayout => write!(f, "Size & Layout"),
            Self::Amenities => write!(f, "Amenities"),
        }
    }
}

/// One line of the price breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub component: BreakdownComponent,
    pub value: f64,
    /// Share of the total, in percent
    pub percentage: f64,
}

/// Fixed-ratio decomposition of a price, for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub items: Vec<BreakdownItem>,
}

impl PriceBreakdown {
    pub fn get(&self, component: BreakdownComponent) -> Option<f64> {
        self.items
            .iter()
            .find(|item| item.component == component)
            .map(|item| item.value)
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.value).sum()
    }
}

/// Estimated price range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower: f64,
    pub upper: f64,
}

/// Rental and return metrics derived from a price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    pub monthly_rent: f64,
    /// Annual yield, in percent
    pub annual_yield: f64,
    /// Years for rent to repay the price
    pub roi_years: f64,
}

/// Price estimate with all derived figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub predicted_price: f64,
    pub price_per_area: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub breakdown: PriceBreakdown,
    pub monthly_rent_estimate: f64,
    pub annual_yield: f64,
    pub roi_years: f64,
    /// Formula factors; absent when a model produced the price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<ValuationFactors>,
    pub source: EstimateSource,
}

impl PriceEstimate {
    pub fn range(&self) -> PriceRange {
        PriceRange {
            lower: self.lower_bound,
            upper: self.upper_bound,
        }
    }

    pub fn metrics(&self) -> InvestmentMetrics {
        InvestmentMetrics {
            monthly_rent: self.monthly_rent_estimate,
            annual_yield: self.annual_yield,
            roi_years: self.roi_years,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Pre-trained price estimators.
//!
//! An estimator is an opaque model that maps a tabular [`FeatureRecord`]
//! to a price. The service only loads and invokes it; training happens
//! elsewhere.
//!
//! The estimator's feature layout differs from [`PropertyRequest`]: it
//! takes `size_sqft` and a coarse `quality` grade instead of individual
//! amenity flags. [`FeatureRecord::from_request`] is the single mapping
//! between the two.

pub mod linear;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::valuation::PropertyRequest;

pub use linear::LinearPriceModel;

/// Finish grade used by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quality {
    Standard,
    Premium,
    Luxury,
}

impl Quality {
    /// Grade implied by the number of selected amenities.
    ///
    /// 0-1 amenities → Standard, 2-3 → Premium, 4 or more → Luxury.
    pub fn from_amenity_count(count: usize) -> Self {
        match count {
            0 | 1 => Self::Standard,
            2 | 3 => Self::Premium,
            _ => Self::Luxury,
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "Standard"),
            Self::Premium => write!(f, "Premium"),
            Self::Luxury => write!(f, "Luxury"),
        }
    }
}

/// One row in the estimator's expected feature layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub location: String,
    pub property_type: String,
    pub size_sqft: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub quality: Quality,
}

impl FeatureRecord {
    pub fn from_request(request: &PropertyRequest) -> Self {
        Self {
            location: request.location.clone(),
            property_type: request.property_type.clone(),
            size_sqft: request.area,
            bedrooms: request.bedrooms,
            bathrooms: request.bathrooms,
            quality: Quality::from_amenity_count(request.amenities().len()),
        }
    }
}

/// A loaded, immutable price model.
pub trait PriceEstimator: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Predict a price for one feature row.
    fn predict(&self, features: &FeatureRecord) -> anyhow::Result<f64>;
}

/// Load the bundled estimator format from `path`.
pub fn load_estimator(path: &Path) -> realty_common::Result<Arc<dyn PriceEstimator>> {
    let model = LinearPriceModel::load(path)?;
    Ok(Arc::new(model))
}

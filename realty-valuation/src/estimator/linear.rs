//! Serialized linear price model.
//!
//! The model is stored as JSON:
//!
//! ```json
//! {
//!   "name": "dubai-linear-v1",
//!   "intercept": 150000.0,
//!   "size_sqft": 900.0,
//!   "bedrooms": 40000.0,
//!   "bathrooms": 15000.0,
//!   "location": { "Palm Jumeirah": 900000.0 },
//!   "property_type": { "Villa": 600000.0 },
//!   "quality": { "Luxury": 350000.0 }
//! }
//! ```
//!
//! Categories missing from a map contribute nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use realty_common::{Error, Result, ResultExt};

use super::{FeatureRecord, PriceEstimator, Quality};

/// Linear model over the estimator feature layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPriceModel {
    #[serde(default = "default_model_name")]
    pub name: String,
    pub intercept: f64,
    /// Coefficient per square foot
    pub size_sqft: f64,
    #[serde(default)]
    pub bedrooms: f64,
    #[serde(default)]
    pub bathrooms: f64,
    #[serde(default)]
    pub location: HashMap<String, f64>,
    #[serde(default)]
    pub property_type: HashMap<String, f64>,
    #[serde(default)]
    pub quality: HashMap<Quality, f64>,
}

fn default_model_name() -> String {
    "linear".into()
}

impl LinearPriceModel {
    /// Read and check a model file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read price model {}", path.display()))?;
        Self::from_json(&content).context(format!("Invalid price model {}", path.display()))
    }

    /// Parse and check a model from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(content)?;
        model.check()?;
        Ok(model)
    }

    fn check(&self) -> Result<()> {
        let scalars = [
            ("intercept", self.intercept),
            ("size_sqft", self.size_sqft),
            ("bedrooms", self.bedrooms),
            ("bathrooms", self.bathrooms),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(Error::InvalidInput(format!("coefficient {field} is not finite")));
            }
        }

        let mut offsets = self
            .location
            .values()
            .chain(self.property_type.values())
            .chain(self.quality.values());
        if offsets.any(|v| !v.is_finite()) {
            return Err(Error::InvalidInput("category offsets must be finite".into()));
        }

        Ok(())
    }
}

impl PriceEstimator for LinearPriceModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureRecord) -> anyhow::Result<f64> {
        if !features.size_sqft.is_finite() {
            anyhow::bail!("size_sqft is not finite");
        }

        let price = self.intercept
            + self.size_sqft * features.size_sqft
            + self.bedrooms * f64::from(features.bedrooms)
            + self.bathrooms * f64::from(features.bathrooms)
            + self.location.get(&features.location).copied().unwrap_or(0.0)
            + self
                .property_type
                .get(&features.property_type)
                .copied()
                .unwrap_or(0.0)
            + self.quality.get(&features.quality).copied().unwrap_or(0.0);

        Ok(price)
    }
}

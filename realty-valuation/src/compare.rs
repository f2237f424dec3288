//! Side-by-side comparison of two or three properties.

use serde::{Deserialize, Serialize};

use crate::error::ValuationError;
use crate::valuation::{PriceEstimate, PropertyRequest, ValuationEngine};

/// Fewest properties a comparison accepts.
pub const MIN_COMPARED: usize = 2;
/// Most properties a comparison accepts.
pub const MAX_COMPARED: usize = 3;

/// One property in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedProperty {
    pub request: PropertyRequest,
    pub estimate: PriceEstimate,
}

/// Result of comparing several properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub properties: Vec<ComparedProperty>,
    /// Index of the property with the lowest price per sqft
    pub best_value: usize,
}

impl Comparison {
    pub fn best(&self) -> &ComparedProperty {
        &self.properties[self.best_value]
    }
}

/// Estimate each property and pick the best value.
///
/// Ties on price per sqft go to the earlier property.
pub fn compare_properties(
    engine: &ValuationEngine,
    requests: &[PropertyRequest],
) -> Result<Comparison, ValuationError> {
    if !(MIN_COMPARED..=MAX_COMPARED).contains(&requests.len()) {
        return Err(ValuationError::InvalidRequest(format!(
            "compare between {MIN_COMPARED} and {MAX_COMPARED} properties, got {}",
            requests.len()
        )));
    }

    let properties = requests
        .iter()
        .enumerate()
        .map(|(i, request)| {
            let estimate = engine.try_estimate_price(request).map_err(|e| {
                ValuationError::InvalidRequest(format!("property {}: {e}", i + 1))
            })?;
            Ok(ComparedProperty {
                request: request.clone(),
                estimate,
            })
        })
        .collect::<Result<Vec<_>, ValuationError>>()?;

    let best_value = properties
        .iter()
        .enumerate()
        .fold(0, |best, (i, property)| {
            if property.estimate.price_per_area < properties[best].estimate.price_per_area {
                i
            } else {
                best
            }
        });

    tracing::debug!(count = properties.len(), best_value, "Properties compared");

    Ok(Comparison {
        properties,
        best_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_value_is_lowest_price_per_area() {
        let engine = ValuationEngine::new();
        let requests = vec![
            PropertyRequest::new("Palm Jumeirah", "Villa", 4, 4000.0),
            PropertyRequest::new("Arabian Ranches", "Townhouse", 3, 2500.0),
            PropertyRequest::new("Downtown Dubai", "Penthouse", 3, 3000.0),
        ];

        let comparison = compare_properties(&engine, &requests).unwrap();
        assert_eq!(comparison.properties.len(), 3);
        assert_eq!(comparison.best_value, 1);
        assert_eq!(comparison.best().request.location, "Arabian Ranches");
    }

    #[test]
    fn test_tie_goes_to_first() {
        let engine = ValuationEngine::new();
        // Dubai Marina and JBR share a multiplier
        let requests = vec![
            PropertyRequest::new("Dubai Marina", "Apartment", 2, 1500.0),
            PropertyRequest::new("JBR", "Apartment", 2, 1500.0),
        ];

        let comparison = compare_properties(&engine, &requests).unwrap();
        assert_eq!(comparison.best_value, 0);
    }

    #[test]
    fn test_rejects_wrong_count() {
        let engine = ValuationEngine::new();
        let one = vec![PropertyRequest::new("JBR", "Villa", 2, 1500.0)];
        assert!(matches!(
            compare_properties(&engine, &one),
            Err(ValuationError::InvalidRequest(_))
        ));

        let four = vec![PropertyRequest::new("JBR", "Villa", 2, 1500.0); 4];
        assert!(compare_properties(&engine, &four).is_err());
    }

    #[test]
    fn test_rejects_invalid_area() {
        let engine = ValuationEngine::new();
        let requests = vec![
            PropertyRequest::new("JBR", "Villa", 2, 1500.0),
            PropertyRequest::new("JBR", "Villa", 2, 0.0),
        ];
        let err = compare_properties(&engine, &requests).unwrap_err();
        assert!(err.to_string().contains("property 2"));
    }

    #[test]
    fn test_rejects_overflowing_area() {
        let engine = ValuationEngine::new();
        let requests = vec![
            PropertyRequest::new("JBR", "Villa", 2, 1500.0),
            PropertyRequest::new("Palm Jumeirah", "Penthouse", 7, 1e305),
        ];
        let err = compare_properties(&engine, &requests).unwrap_err();
        assert!(matches!(err, ValuationError::InvalidRequest(_)));
        assert!(err.to_string().contains("property 2"));
    }
}

//! Market insight tables generated from the valuation formula.
//!
//! Each table holds one attribute varying while the rest of a reference
//! property stays fixed:
//!
//! - locations: 2-bed, 2-bath, 1500 sqft apartment with every amenity
//! - property types: 3-bed, 3-bath, 2000 sqft Dubai Marina home with every amenity
//! - sizes: 2-bed Downtown Dubai apartment with every amenity, 500 to 5000 sqft

use serde::{Deserialize, Serialize};

use crate::valuation::{PropertyRequest, ValuationEngine};

/// Smallest area in the size table.
pub const SIZE_START: u32 = 500;
/// Largest area in the size table.
pub const SIZE_END: u32 = 5000;
/// Step between rows of the size table.
pub const SIZE_STEP: u32 = 500;

/// One row of an insight table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRow {
    /// Value of the attribute that varies (location, type or area)
    pub label: String,
    pub area: f64,
    pub predicted_price: f64,
    pub price_per_area: f64,
}

fn row(engine: &ValuationEngine, label: String, request: &PropertyRequest) -> InsightRow {
    let estimate = engine.estimate_price(request);
    InsightRow {
        label,
        area: request.area,
        predicted_price: estimate.predicted_price,
        price_per_area: estimate.price_per_area,
    }
}

/// Price of the reference apartment in every known location, cheapest first.
pub fn location_insights(engine: &ValuationEngine) -> Vec<InsightRow> {
    let mut rows: Vec<InsightRow> = engine
        .locations()
        .keys()
        .map(|location| {
            let request = PropertyRequest::new(location, "Apartment", 2, 1500.0)
                .with_bathrooms(2)
                .with_parking(1)
                .with_all_amenities();
            row(engine, location.to_string(), &request)
        })
        .collect();

    // Stable: equal prices keep table order
    rows.sort_by(|a, b| a.predicted_price.total_cmp(&b.predicted_price));
    rows
}

/// Price of the reference Dubai Marina home for every known property type.
pub fn type_insights(engine: &ValuationEngine) -> Vec<InsightRow> {
    engine
        .property_types()
        .keys()
        .map(|property_type| {
            let request = PropertyRequest::new("Dubai Marina", property_type, 3, 2000.0)
                .with_bathrooms(3)
                .with_parking(2)
                .with_all_amenities();
            row(engine, property_type.to_string(), &request)
        })
        .collect()
}

/// Price of the reference Downtown Dubai apartment across sizes.
pub fn size_insights(engine: &ValuationEngine) -> Vec<InsightRow> {
    (SIZE_START..=SIZE_END)
        .step_by(SIZE_STEP as usize)
        .map(|size| {
            let request = PropertyRequest::new("Downtown Dubai", "Apartment", 2, f64::from(size))
                .with_bathrooms(2)
                .with_parking(1)
                .with_all_amenities();
            row(engine, format!("{size} sqft"), &request)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_insights_sorted_ascending() {
        let rows = location_insights(&ValuationEngine::new());
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Arabian Ranches",
                "Dubai Marina",
                "JBR",
                "Business Bay",
                "Downtown Dubai",
                "Palm Jumeirah"
            ]
        );
        assert!(rows.windows(2).all(|w| w[0].predicted_price <= w[1].predicted_price));

        let downtown = rows.iter().find(|r| r.label == "Downtown Dubai").unwrap();
        assert!((downtown.predicted_price - 2_184_000.0).abs() < 1e-6);
        assert!((downtown.price_per_area - 1_456.0).abs() < 1e-9);
    }

    #[test]
    fn test_type_insights_keep_table_order() {
        let rows = type_insights(&ValuationEngine::new());
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Apartment", "Villa", "Townhouse", "Penthouse"]);

        // 1e6 × 1.3 × 1.0 × (2000/1500) × 1.6 × 1.12
        let expected = 1_000_000.0 * 1.3 * 1.0 * (2000.0 / 1500.0) * (3.0 * 0.3 + 0.7) * 1.12;
        assert!((rows[0].predicted_price - expected).abs() < 1e-6);
        assert!(rows[3].predicted_price > rows[1].predicted_price);
    }

    #[test]
    fn test_size_insights_range() {
        let rows = size_insights(&ValuationEngine::new());
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].area, 500.0);
        assert_eq!(rows[9].area, 5000.0);
        assert_eq!(rows[2].label, "1500 sqft");
        // Linear in area: constant price per sqft
        assert!(rows
            .windows(2)
            .all(|w| (w[0].price_per_area - w[1].price_per_area).abs() < 1e-9));
    }
}

//! Display formatting for estimates.
//!
//! Amounts are whole currency units with thousands separators
//! (`AED 1,234,567`); breakdown shares have no decimals, yield has two.

use serde::{Deserialize, Serialize};

use crate::valuation::{PriceBreakdown, PriceEstimate, PriceRange, PropertyRequest};

/// Round to a whole number and insert thousands separators.
///
/// Non-finite values render as `n/a`.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".into();
    }

    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 && digits != "0" {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `AED 1,234,567`
pub fn format_currency(currency: &str, value: f64) -> String {
    format!("{currency} {}", group_thousands(value))
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

/// `2.0M - 2.4M`
pub fn format_millions_range(range: &PriceRange) -> String {
    format!(
        "{:.1}M - {:.1}M",
        range.lower / 1_000_000.0,
        range.upper / 1_000_000.0
    )
}

pub fn format_years(years: f64) -> String {
    format!("{years:.0} years")
}

/// One formatted breakdown line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    pub amount: String,
    pub percentage: String,
}

pub fn format_breakdown(currency: &str, breakdown: &PriceBreakdown) -> Vec<BreakdownLine> {
    breakdown
        .items
        .iter()
        .map(|item| BreakdownLine {
            label: item.component.to_string(),
            amount: format_currency(currency, item.value),
            percentage: format_percent(item.percentage, 0),
        })
        .collect()
}

/// Pre-formatted strings for every figure of an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateDisplay {
    pub predicted_price: String,
    pub price_per_area: String,
    pub price_range: String,
    pub lower_bound: String,
    pub upper_bound: String,
    pub breakdown: Vec<BreakdownLine>,
    pub monthly_rent: String,
    pub annual_yield: String,
    pub roi: String,
}

impl EstimateDisplay {
    pub fn new(currency: &str, estimate: &PriceEstimate) -> Self {
        Self {
            predicted_price: format_currency(currency, estimate.predicted_price),
            price_per_area: format_currency(currency, estimate.price_per_area),
            price_range: format_millions_range(&estimate.range()),
            lower_bound: format_currency(currency, estimate.lower_bound),
            upper_bound: format_currency(currency, estimate.upper_bound),
            breakdown: format_breakdown(currency, &estimate.breakdown),
            monthly_rent: format_currency(currency, estimate.monthly_rent_estimate),
            annual_yield: format_percent(estimate.annual_yield, 2),
            roi: format_years(estimate.roi_years),
        }
    }
}

/// One feature/value row of a property summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub feature: String,
    pub value: String,
}

/// Tabular summary of the submitted property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySummary {
    pub rows: Vec<SummaryRow>,
    /// Selected amenity labels; empty when none were selected
    pub amenities: Vec<String>,
}

impl PropertySummary {
    pub fn from_request(request: &PropertyRequest) -> Self {
        let row = |feature: &str, value: String| SummaryRow {
            feature: feature.to_string(),
            value,
        };

        Self {
            rows: vec![
                row("Location", request.location.clone()),
                row("Type", request.property_type.clone()),
                row("Bedrooms", request.bedrooms.to_string()),
                row("Bathrooms", request.bathrooms.to_string()),
                row("Area", format!("{} sqft", group_thousands(request.area))),
                row("Parking", request.parking.to_string()),
            ],
            amenities: request
                .amenities()
                .into_iter()
                .map(|a| a.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::{estimate_price, Amenity};

    #[test]
    fn test_group_thousands() {
        let cases = vec![
            (0.0, "0"),
            (999.0, "999"),
            (1000.0, "1,000"),
            (1_234_567.0, "1,234,567"),
            (2_183_999.9999999995, "2,184,000"),
            (1_456.4, "1,456"),
            (-12_345.0, "-12,345"),
            (-0.3, "0"),
            (f64::INFINITY, "n/a"),
        ];
        for (value, expected) in cases {
            assert_eq!(group_thousands(value), expected, "{value}");
        }
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_currency("AED", 1_950_000.0), "AED 1,950,000");
        assert_eq!(format_percent(5.0, 2), "5.00%");
        assert_eq!(format_percent(25.0, 0), "25%");
        assert_eq!(format_years(20.0), "20 years");
        assert_eq!(
            format_millions_range(&PriceRange {
                lower: 1_965_600.0,
                upper: 2_402_400.0
            }),
            "2.0M - 2.4M"
        );
    }

    #[test]
    fn test_estimate_display() {
        let request = PropertyRequest::new("Downtown Dubai", "Apartment", 2, 1500.0)
            .with_all_amenities();
        let display = EstimateDisplay::new("AED", &estimate_price(&request));

        assert_eq!(display.predicted_price, "AED 2,184,000");
        assert_eq!(display.price_per_area, "AED 1,456");
        assert_eq!(display.lower_bound, "AED 1,965,600");
        assert_eq!(display.upper_bound, "AED 2,402,400");
        assert_eq!(display.price_range, "2.0M - 2.4M");
        assert_eq!(display.monthly_rent, "AED 9,107");
        assert_eq!(display.annual_yield, "5.00%");
        assert_eq!(display.roi, "20 years");

        let labels: Vec<&str> = display.breakdown.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Base Price", "Location Premium", "Size & Layout", "Amenities"]
        );
        assert_eq!(display.breakdown[0].amount, "AED 1,092,000");
        assert_eq!(display.breakdown[3].percentage, "10%");
    }

    #[test]
    fn test_property_summary() {
        let request = PropertyRequest::new("JBR", "Townhouse", 3, 2500.0)
            .with_bathrooms(2)
            .with_parking(2)
            .with_amenity(Amenity::Pool, true)
            .with_amenity(Amenity::Balcony, true);

        let summary = PropertySummary::from_request(&request);
        assert_eq!(summary.rows.len(), 6);
        assert_eq!(summary.rows[4].feature, "Area");
        assert_eq!(summary.rows[4].value, "2,500 sqft");
        assert_eq!(summary.amenities, vec!["Pool", "Balcony"]);

        let bare = PropertySummary::from_request(&PropertyRequest::new("JBR", "Villa", 1, 900.0));
        assert!(bare.amenities.is_empty());
    }
}

//! Property-based invariant tests for the valuation formula.
//!
//! 1. Estimates are finite and positive for any positive area
//! 2. Price scales linearly with area and rises with every bedroom
//! 3. Each amenity raises the price by exactly its bonus
//! 4. The breakdown always sums to the predicted price
//! 5. The range brackets the predicted price

use proptest::prelude::*;
use realty_valuation::valuation::{
    breakdown, estimate_price, investment_metrics, Amenity, PropertyRequest,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn location_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Downtown Dubai".to_string()),
        Just("Dubai Marina".to_string()),
        Just("Palm Jumeirah".to_string()),
        Just("Business Bay".to_string()),
        Just("JBR".to_string()),
        Just("Arabian Ranches".to_string()),
        "[A-Za-z ]{1,20}",
    ]
}

fn type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Apartment".to_string()),
        Just("Villa".to_string()),
        Just("Townhouse".to_string()),
        Just("Penthouse".to_string()),
        "[A-Za-z]{1,12}",
    ]
}

fn request_strategy() -> impl Strategy<Value = PropertyRequest> {
    (
        location_strategy(),
        type_strategy(),
        0u32..20,
        1.0f64..50_000.0,
        any::<[bool; 4]>(),
    )
        .prop_map(|(location, property_type, bedrooms, area, flags)| {
            Amenity::ALL
                .iter()
                .zip(flags)
                .fold(
                    PropertyRequest::new(location, property_type, bedrooms, area),
                    |request, (&amenity, present)| request.with_amenity(amenity, present),
                )
        })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Finite and positive
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn estimate_is_finite_and_positive(request in request_strategy()) {
        let estimate = estimate_price(&request);
        prop_assert!(estimate.predicted_price.is_finite());
        prop_assert!(estimate.predicted_price > 0.0);
        prop_assert!(close(estimate.price_per_area * request.area, estimate.predicted_price));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Linear in area, increasing in bedrooms
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn doubling_area_doubles_price(request in request_strategy()) {
        let mut doubled = request.clone();
        doubled.area *= 2.0;

        let base = estimate_price(&request).predicted_price;
        let twice = estimate_price(&doubled).predicted_price;
        prop_assert!(close(twice, base * 2.0));
    }
}

proptest! {
    #[test]
    fn extra_bedroom_raises_price(request in request_strategy()) {
        let mut larger = request.clone();
        larger.bedrooms += 1;

        let base = estimate_price(&request).predicted_price;
        let more = estimate_price(&larger).predicted_price;
        prop_assert!(more > base);
        // Each bedroom adds 0.3 to a layout factor that starts at 0.7
        let layout = f64::from(request.bedrooms) * 0.3 + 0.7;
        prop_assert!(close(more, base / layout * (layout + 0.3)));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Amenity increments
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn adding_amenity_adds_its_bonus(
        request in request_strategy(),
        index in 0usize..4,
    ) {
        let amenity = Amenity::ALL[index];
        let without = request.clone().with_amenity(amenity, false);
        let with = request.with_amenity(amenity, true);

        let bonus_without: f64 = without.amenities().iter().map(|a| a.bonus()).sum();
        let price_without = estimate_price(&without).predicted_price;
        let price_with = estimate_price(&with).predicted_price;

        let expected = price_without / (1.0 + bonus_without) * (1.0 + bonus_without + amenity.bonus());
        prop_assert!(price_with > price_without);
        prop_assert!(close(price_with, expected));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Breakdown sum and 5. range bounds
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn breakdown_sums_to_price(price in 1.0f64..1e10) {
        let parts = breakdown(price);
        prop_assert_eq!(parts.items.len(), 4);
        prop_assert!(close(parts.total(), price));

        let percent: f64 = parts.items.iter().map(|item| item.percentage).sum();
        prop_assert!(close(percent, 100.0));
    }

    #[test]
    fn range_brackets_price(request in request_strategy()) {
        let estimate = estimate_price(&request);
        prop_assert!(estimate.lower_bound < estimate.predicted_price);
        prop_assert!(estimate.predicted_price < estimate.upper_bound);
        prop_assert!(close(estimate.upper_bound - estimate.predicted_price,
                           estimate.predicted_price - estimate.lower_bound));
    }

    #[test]
    fn metrics_are_fixed_ratios(price in 1.0f64..1e10) {
        let metrics = investment_metrics(price);
        prop_assert!(close(metrics.monthly_rent, price * 0.00417));
        prop_assert_eq!(metrics.annual_yield, 5.0);
        prop_assert_eq!(metrics.roi_years, 20.0);
    }
}

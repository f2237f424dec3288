//! Historical listings and aggregate market statistics.
//!
//! Listings are read once from a JSON array of
//! `{ "location", "property_type", "price" }` records and reduced to mean
//! price and count per location and per property type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use realty_common::{Error, Result, ResultExt};

/// One historical listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub location: String,
    pub property_type: String,
    pub price: f64,
}

/// Mean price and listing count for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub name: String,
    pub mean_price: f64,
    pub count: usize,
}

/// Aggregate statistics over a listings dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    /// Listings used in the aggregates
    pub total_listings: usize,
    /// Listings dropped for a non-finite or non-positive price
    pub skipped: usize,
    pub overall_mean_price: f64,
    /// Per-location aggregates, sorted by name
    pub by_location: Vec<GroupStats>,
    /// Per-type aggregates, sorted by name
    pub by_property_type: Vec<GroupStats>,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, price: f64) {
        self.sum += price;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

fn collect_groups(groups: BTreeMap<&str, Accumulator>) -> Vec<GroupStats> {
    groups
        .into_iter()
        .map(|(name, acc)| GroupStats {
            name: name.to_string(),
            mean_price: acc.mean(),
            count: acc.count,
        })
        .collect()
}

impl MarketStats {
    pub fn from_listings(listings: &[Listing]) -> Self {
        let mut overall = Accumulator::default();
        let mut by_location: BTreeMap<&str, Accumulator> = BTreeMap::new();
        let mut by_type: BTreeMap<&str, Accumulator> = BTreeMap::new();
        let mut skipped = 0;

        for listing in listings {
            if !listing.price.is_finite() || listing.price <= 0.0 {
                skipped += 1;
                continue;
            }
            overall.add(listing.price);
            by_location
                .entry(listing.location.as_str())
                .or_default()
                .add(listing.price);
            by_type
                .entry(listing.property_type.as_str())
                .or_default()
                .add(listing.price);
        }

        Self {
            total_listings: overall.count,
            skipped,
            overall_mean_price: overall.mean(),
            by_location: collect_groups(by_location),
            by_property_type: collect_groups(by_type),
        }
    }

    pub fn location(&self, name: &str) -> Option<&GroupStats> {
        self.by_location.iter().find(|g| g.name == name)
    }

    pub fn property_type(&self, name: &str) -> Option<&GroupStats> {
        self.by_property_type.iter().find(|g| g.name == name)
    }
}

/// Read listings from a JSON array file.
pub fn load_listings(path: &Path) -> Result<Vec<Listing>> {
    let content = fs::read_to_string(path)
        .context(format!("Failed to read listings {}", path.display()))?;
    serde_json::from_str::<Vec<Listing>>(&content)
        .context(format!("Invalid listings file {}", path.display()))
}

/// Read listings and aggregate them.
///
/// A dataset with no usable listing is rejected.
pub fn load_market_stats(path: &Path) -> Result<MarketStats> {
    let listings = load_listings(path)?;
    let stats = MarketStats::from_listings(&listings);

    if stats.total_listings == 0 {
        return Err(Error::InvalidInput(format!(
            "{} contains no usable listings",
            path.display()
        )));
    }

    if stats.skipped > 0 {
        tracing::warn!(
            skipped = stats.skipped,
            path = %path.display(),
            "Skipped listings with unusable prices"
        );
    }

    Ok(stats)
}

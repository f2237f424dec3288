//! Multiplier tables.
//!
//! A multiplier table maps a categorical attribute (location, property type)
//! to a positive scaling factor. Keys missing from a table resolve to the
//! table's default of 1.0 instead of failing.

use once_cell::sync::Lazy;

/// Multiplier used for any key a table does not contain.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Location multipliers.
pub static LOCATION_MULTIPLIERS: Lazy<MultiplierTable> = Lazy::new(|| {
    MultiplierTable::new(
        "location",
        &[
            ("Downtown Dubai", 1.5),
            ("Dubai Marina", 1.3),
            ("Palm Jumeirah", 1.8),
            ("Business Bay", 1.4),
            ("JBR", 1.3),
            ("Arabian Ranches", 1.2),
        ],
    )
});

/// Property type multipliers.
pub static PROPERTY_TYPE_MULTIPLIERS: Lazy<MultiplierTable> = Lazy::new(|| {
    MultiplierTable::new(
        "property_type",
        &[
            ("Apartment", 1.0),
            ("Villa", 1.5),
            ("Townhouse", 1.2),
            ("Penthouse", 1.8),
        ],
    )
});

/// Ordered, read-only category → multiplier mapping with a default.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplierTable {
    name: &'static str,
    entries: Vec<(&'static str, f64)>,
    default: f64,
}

impl MultiplierTable {
    /// Build a table with the standard default of 1.0.
    pub fn new(name: &'static str, entries: &[(&'static str, f64)]) -> Self {
        Self::with_default(name, entries, DEFAULT_MULTIPLIER)
    }

    pub fn with_default(name: &'static str, entries: &[(&'static str, f64)], default: f64) -> Self {
        Self {
            name,
            entries: entries.to_vec(),
            default,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Multiplier for `key`, or the table default when unmapped.
    ///
    /// Matching is exact and case-sensitive.
    pub fn lookup(&self, key: &str) -> f64 {
        self.get(key).unwrap_or_else(|| {
            tracing::trace!(table = self.name, key, "Unmapped key, using default multiplier");
            self.default
        })
    }

    /// Multiplier for `key`, or `None` when unmapped.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, multiplier)| *multiplier)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn default_multiplier(&self) -> f64 {
        self.default
    }

    /// Known keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn entries(&self) -> &[(&'static str, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_lookup() {
        let cases = vec![
            ("Downtown Dubai", 1.5),
            ("Dubai Marina", 1.3),
            ("Palm Jumeirah", 1.8),
            ("Business Bay", 1.4),
            ("JBR", 1.3),
            ("Arabian Ranches", 1.2),
        ];
        for (location, expected) in cases {
            assert_eq!(LOCATION_MULTIPLIERS.lookup(location), expected, "{location}");
        }
    }

    #[test]
    fn test_property_type_lookup() {
        let cases = vec![
            ("Apartment", 1.0),
            ("Villa", 1.5),
            ("Townhouse", 1.2),
            ("Penthouse", 1.8),
        ];
        for (property_type, expected) in cases {
            assert_eq!(
                PROPERTY_TYPE_MULTIPLIERS.lookup(property_type),
                expected,
                "{property_type}"
            );
        }
    }

    #[test]
    fn test_unknown_keys_fall_back_to_default() {
        assert_eq!(LOCATION_MULTIPLIERS.lookup("Atlantis"), DEFAULT_MULTIPLIER);
        assert_eq!(PROPERTY_TYPE_MULTIPLIERS.lookup("Castle"), DEFAULT_MULTIPLIER);
        assert_eq!(LOCATION_MULTIPLIERS.get("Atlantis"), None);
        // Case-sensitive, like the form values
        assert_eq!(LOCATION_MULTIPLIERS.get("jbr"), None);
        assert_eq!(LOCATION_MULTIPLIERS.lookup(""), 1.0);
    }

    #[test]
    fn test_keys_keep_declaration_order() {
        let keys: Vec<&str> = PROPERTY_TYPE_MULTIPLIERS.keys().collect();
        assert_eq!(keys, vec!["Apartment", "Villa", "Townhouse", "Penthouse"]);
        assert_eq!(LOCATION_MULTIPLIERS.len(), 6);
        assert!(!LOCATION_MULTIPLIERS.is_empty());
        assert_eq!(LOCATION_MULTIPLIERS.name(), "location");
    }

    #[test]
    fn test_custom_default() {
        let table = MultiplierTable::with_default("test", &[("a", 2.0)], 0.5);
        assert_eq!(table.lookup("a"), 2.0);
        assert_eq!(table.lookup("b"), 0.5);
        assert!(table.contains("a"));
        assert_eq!(table.default_multiplier(), 0.5);
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// City name to altitude lookup, ft.
///
/// Names match exactly, the way the selection tool's city picklist does.
///
/// # Example
///
/// ```
/// use erv_models::models::hvac::erv::CityTable;
///
/// let table = CityTable::from_entries([("Leadville, CO", 10_152.0)]);
/// assert_eq!(table.altitude_ft("Leadville, CO"), Some(10_152.0));
/// assert_eq!(table.altitude_ft("leadville, co"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityTable {
    altitudes: HashMap<String, f64>,
}

/// A small built-in set of design cities.
const SAMPLE_CITIES: [(&str, f64); 10] = [
    ("Albuquerque, NM", 5312.0),
    ("Atlanta, GA", 1050.0),
    ("Chicago, IL", 594.0),
    ("Dallas, TX", 430.0),
    ("Denver, CO", 5280.0),
    ("Miami, FL", 6.0),
    ("New York, NY", 33.0),
    ("Phoenix, AZ", 1086.0),
    ("Salt Lake City, UT", 4226.0),
    ("Seattle, WA", 175.0),
];

impl CityTable {
    /// Builds a table from `(city, altitude_ft)` pairs.
    ///
    /// Later duplicates replace earlier ones.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            altitudes: entries
                .into_iter()
                .map(|(city, altitude)| (city.into(), altitude))
                .collect(),
        }
    }

    /// Returns the built-in sample table.
    #[must_use]
    pub fn sample() -> Self {
        Self::from_entries(SAMPLE_CITIES)
    }

    #[must_use]
    pub fn altitude_ft(&self, city: &str) -> Option<f64> {
        self.altitudes.get(city).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.altitudes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.altitudes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_contains_denver() {
        let table = CityTable::sample();
        assert_eq!(table.len(), SAMPLE_CITIES.len());
        assert_eq!(table.altitude_ft("Denver, CO"), Some(5280.0));
    }

    #[test]
    fn match_is_exact() {
        let table = CityTable::sample();
        assert_eq!(table.altitude_ft("Denver"), None);
        assert_eq!(table.altitude_ft(" Denver, CO"), None);
    }

    #[test]
    fn later_entries_win() {
        let table = CityTable::from_entries([("Here", 1.0), ("Here", 2.0)]);
        assert_eq!(table.altitude_ft("Here"), Some(2.0));
        assert!(CityTable::default().is_empty());
    }
}

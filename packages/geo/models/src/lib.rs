#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! County-level geolocation types.
//!
//! These types carry the canonical location and population data derived
//! from city-level geocode rows. They are independent of the statistics
//! time series; the two datasets meet on [`CountyKey`].

pub mod states;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized (state, county) identity used as the join key between the
/// geocode and statistics datasets.
///
/// Construction trims whitespace, uppercases the state abbreviation, and
/// lowercases the county name, so differently-cased source rows collapse
/// onto one key. Ordering is state-major, which keeps member sets grouped
/// by state in output.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct CountyKey {
    /// Two-letter USPS state abbreviation, uppercased.
    pub state: String,
    /// County name, trimmed and lowercased.
    pub county: String,
}

impl CountyKey {
    /// Creates a normalized key from raw state/county strings.
    #[must_use]
    pub fn new(state: &str, county: &str) -> Self {
        Self {
            state: state.trim().to_uppercase(),
            county: county.trim().to_lowercase(),
        }
    }
}

impl fmt::Display for CountyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.county, self.state)
    }
}

/// One city-level row from the geocode dataset, reduced to the fields the
/// county fold uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityObservation {
    /// Two-letter state abbreviation.
    pub state: String,
    /// County the city belongs to. Empty in some source rows.
    pub county: String,
    /// City latitude in degrees.
    pub latitude: f64,
    /// City longitude in degrees.
    pub longitude: f64,
    /// Estimated city population.
    pub population: u64,
}

/// Canonical per-county location and population record.
///
/// Built incrementally from [`CityObservation`]s: the population
/// accumulates across all of a county's city rows while the representative
/// coordinate tracks the single most populous city seen so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRecord {
    /// Representative latitude (the most populous city's).
    pub latitude: f64,
    /// Representative longitude (the most populous city's).
    pub longitude: f64,
    /// Cumulative population across every contributing city row.
    pub population: u64,
    /// Population of the city currently providing the coordinates.
    pub largest_city_population: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn county_key_normalizes() {
        assert_eq!(
            CountyKey::new(" ca ", " Alameda "),
            CountyKey::new("CA", "alameda")
        );
    }

    #[test]
    fn county_key_display() {
        let key = CountyKey::new("TN", "Davidson");
        assert_eq!(key.to_string(), "davidson, TN");
    }

    #[test]
    fn county_key_orders_state_major() {
        let mut keys = vec![
            CountyKey::new("TN", "Davidson"),
            CountyKey::new("CA", "Alameda"),
            CountyKey::new("CA", "Marin"),
        ];
        keys.sort();
        assert_eq!(keys[0].state, "CA");
        assert_eq!(keys[1].county, "marin");
        assert_eq!(keys[2].state, "TN");
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Radius query and aggregation result types.
//!
//! Defines the input/output types of the aggregation engine, including the
//! batch document the external choropleth renderer consumes.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use covid_map_geo_models::{CountyKey, GeoRecord};
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) on query radii, in miles.
pub const MAX_RADIUS_MILES: f64 = 1000.0;

/// One radius query: a target county and a search radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusQuery {
    /// County at the center of the search.
    pub target: CountyKey,
    /// Search radius in statute miles. Always in `[0, 1000)`.
    pub radius_miles: f64,
}

impl RadiusQuery {
    /// Creates a query, validating the radius.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRadiusError`] if the radius is negative, not
    /// finite, or at least [`MAX_RADIUS_MILES`]. A NaN radius would
    /// otherwise silently produce an empty region.
    pub fn new(target: CountyKey, radius_miles: f64) -> Result<Self, InvalidRadiusError> {
        if !radius_miles.is_finite() || radius_miles < 0.0 || radius_miles >= MAX_RADIUS_MILES {
            return Err(InvalidRadiusError { radius_miles });
        }
        Ok(Self {
            target,
            radius_miles,
        })
    }
}

/// Error returned when constructing a [`RadiusQuery`] with an out-of-range
/// radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidRadiusError {
    /// The rejected radius value.
    pub radius_miles: f64,
}

impl std::fmt::Display for InvalidRadiusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid radius {} miles: expected a finite value in [0, 1000)",
            self.radius_miles
        )
    }
}

impl std::error::Error for InvalidRadiusError {}

/// A resolved query region: the target's canonical record plus every
/// county within the radius.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSelection {
    /// Canonical record of the query's target county.
    pub target: GeoRecord,
    /// Counties within the radius, the target included.
    pub members: BTreeSet<CountyKey>,
}

/// Aggregation output for a single query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    /// The query this result answers.
    pub query: RadiusQuery,
    /// Counties that contributed to the totals.
    pub members: BTreeSet<CountyKey>,
    /// Sum of the requested statistic across members. Members missing
    /// from the statistics data count as zero.
    pub raw_total: f64,
    /// Sum of member cumulative populations.
    pub total_population: u64,
    /// Statistic total per 100,000 residents. `None` when the region has
    /// no population data, which is distinct from a true zero rate.
    pub density: Option<f64>,
    /// FIPS codes of the members found in the statistics data.
    pub fips: Vec<String>,
}

/// Value assigned to one county in the choropleth mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionValue {
    /// Raw statistic total of the query region the county belongs to.
    pub raw_total: f64,
    /// Density of that region, when defined.
    pub density: Option<f64>,
}

/// Diagnostic summary of one resolved query, for legends and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    /// Query target county.
    pub target: CountyKey,
    /// Query radius in miles.
    pub radius_miles: f64,
    /// Resolved member counties, in key order.
    pub members: Vec<CountyKey>,
    /// Raw statistic total for the region.
    pub raw_total: f64,
    /// Total population of the region.
    pub total_population: u64,
    /// Region density, when defined.
    pub density: Option<f64>,
}

/// Full batch output handed to the external choropleth renderer.
///
/// `values` maps county FIPS codes to the aggregate of the last query (in
/// input order) whose region contained the county; all members of one
/// query share the same rendered value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutput {
    /// The aggregated statistic's name.
    pub statistic: String,
    /// Target date the statistics were resolved at, if one was given.
    pub target_date: Option<NaiveDate>,
    /// FIPS → rendered value mapping across the whole batch.
    pub values: BTreeMap<String, RegionValue>,
    /// One diagnostic summary per query, in input order.
    pub regions: Vec<RegionSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> CountyKey {
        CountyKey::new("CA", "Alameda")
    }

    #[test]
    fn accepts_radii_below_the_bound() {
        assert!(RadiusQuery::new(key(), 999.9).is_ok());
        assert!(RadiusQuery::new(key(), 0.0).is_ok());
    }

    #[test]
    fn rejects_the_bound_itself() {
        assert_eq!(
            RadiusQuery::new(key(), 1000.0),
            Err(InvalidRadiusError {
                radius_miles: 1000.0
            })
        );
    }

    #[test]
    fn rejects_negative_and_non_finite_radii() {
        assert!(RadiusQuery::new(key(), -0.1).is_err());
        assert!(RadiusQuery::new(key(), f64::NAN).is_err());
        assert!(RadiusQuery::new(key(), f64::INFINITY).is_err());
    }

    #[test]
    fn undefined_density_serializes_as_null() {
        let value = RegionValue {
            raw_total: 4.0,
            density: None,
        };
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"rawTotal":4.0,"density":null}"#);
    }
}

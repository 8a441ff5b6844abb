#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory county location index.
//!
//! The geocode dataset is city-grained while queries are county-grained;
//! this crate folds city observations into one canonical record per county
//! (population sum + most-populous-city representative coordinate) and
//! answers radius membership scans against those coordinates. Built once
//! at startup and read-only afterwards.

use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};

use covid_map_geo_models::{CityObservation, CountyKey, GeoRecord};
use covid_map_spatial::distance_miles;

/// Canonical per-county location and population records.
#[derive(Debug, Default)]
pub struct GeoIndex {
    records: BTreeMap<CountyKey, GeoRecord>,
}

impl GeoIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one city-level observation to its county's record.
    ///
    /// A new county starts with the observation's coordinates and
    /// population; subsequent observations add their population to the
    /// county total and take over the representative coordinate only when
    /// they beat the current largest city. Rows with an empty county name
    /// cannot be keyed and are dropped.
    pub fn ingest(&mut self, observation: &CityObservation) {
        if observation.county.trim().is_empty() {
            log::debug!(
                "Skipping geocode row with empty county name (state {})",
                observation.state
            );
            return;
        }

        let key = CountyKey::new(&observation.state, &observation.county);
        match self.records.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(GeoRecord {
                    latitude: observation.latitude,
                    longitude: observation.longitude,
                    population: observation.population,
                    largest_city_population: observation.population,
                });
            }
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                record.population += observation.population;
                if observation.population > record.largest_city_population {
                    record.latitude = observation.latitude;
                    record.longitude = observation.longitude;
                    record.largest_city_population = observation.population;
                }
            }
        }
    }

    /// Looks up the canonical record for a county.
    #[must_use]
    pub fn lookup(&self, key: &CountyKey) -> Option<&GeoRecord> {
        self.records.get(key)
    }

    /// Returns every county whose representative coordinate lies within
    /// `radius_miles` of `center`'s, boundary inclusive.
    ///
    /// A county at distance zero (the center itself, or a county sharing
    /// the identical representative coordinate) is always included. This
    /// is a linear scan over all known counties; county counts are in the
    /// low thousands, so no spatial index is warranted for batch CLI use.
    #[must_use]
    pub fn find_within_radius(&self, center: &GeoRecord, radius_miles: f64) -> BTreeSet<CountyKey> {
        self.records
            .iter()
            .filter(|(_, record)| {
                distance_miles(
                    center.latitude,
                    center.longitude,
                    record.latitude,
                    record.longitude,
                ) <= radius_miles
            })
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Number of counties in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no counties have been ingested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates all county records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CountyKey, &GeoRecord)> {
        self.records.iter()
    }
}

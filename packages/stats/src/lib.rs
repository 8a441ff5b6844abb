#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-county, per-date statistic store.
//!
//! Holds one [`StatRecord`] per (county, date) and resolves "which date to
//! use": an exact match when a target date is supplied, the most recent
//! observed date otherwise. Works for both the latest-snapshot and
//! full-time-series dataset variants. Built once at startup and read-only
//! afterwards.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use covid_map_geo_models::CountyKey;
use covid_map_stats_models::StatRecord;

/// Per-county time series of statistic records.
#[derive(Debug)]
pub struct StatStore {
    statistic_names: Vec<String>,
    records: BTreeMap<CountyKey, BTreeMap<NaiveDate, StatRecord>>,
}

impl StatStore {
    /// Creates an empty store for the given header-derived statistic
    /// names, kept in header order.
    #[must_use]
    pub const fn new(statistic_names: Vec<String>) -> Self {
        Self {
            statistic_names,
            records: BTreeMap::new(),
        }
    }

    /// Statistic names this dataset declares, in header order.
    #[must_use]
    pub fn statistic_names(&self) -> &[String] {
        &self.statistic_names
    }

    /// Returns `true` if the dataset's header declared the statistic.
    #[must_use]
    pub fn has_statistic(&self, name: &str) -> bool {
        self.statistic_names.iter().any(|n| n == name)
    }

    /// Records one dataset row.
    ///
    /// Re-ingesting the same (county, date) replaces the previous record.
    /// The source should not contain such duplicates, so the replacement
    /// is warned about rather than silently applied.
    pub fn ingest(&mut self, key: CountyKey, date: NaiveDate, record: StatRecord) {
        let replaced = self
            .records
            .get(&key)
            .is_some_and(|dates| dates.contains_key(&date));
        if replaced {
            log::warn!("Statistics for {key} on {date} already loaded; replacing");
        }
        self.records.entry(key).or_default().insert(date, record);
    }

    /// Resolves the record to use for a county.
    ///
    /// With a target date, only an exact match counts (no nearest-date
    /// fallback); without one, the most recent observed date wins. `None`
    /// contributes zero downstream; it is not an error.
    #[must_use]
    pub fn resolve(&self, key: &CountyKey, target_date: Option<NaiveDate>) -> Option<&StatRecord> {
        let dates = self.records.get(key)?;
        match target_date {
            Some(date) => dates.get(&date),
            None => dates.last_key_value().map(|(_, record)| record),
        }
    }

    /// Returns the county's FIPS code from its most recent record.
    ///
    /// FIPS assignments do not change across the time series, so target
    /// date resolution does not apply here.
    #[must_use]
    pub fn fips(&self, key: &CountyKey) -> Option<&str> {
        self.records
            .get(key)?
            .last_key_value()
            .map(|(_, record)| record.fips.as_str())
    }

    /// Number of counties with at least one record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no rows have been ingested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(fips: &str, cases: f64) -> StatRecord {
        StatRecord {
            fips: fips.to_string(),
            values: BTreeMap::from([("cases".to_string(), cases)]),
        }
    }

    fn store_with_series() -> StatStore {
        let mut store = StatStore::new(vec!["cases".to_string()]);
        let key = CountyKey::new("CA", "Alameda");
        store.ingest(key.clone(), date("2021-01-01"), record("06001", 10.0));
        store.ingest(key, date("2021-01-05"), record("06001", 20.0));
        store
    }

    #[test]
    fn resolves_latest_without_target_date() {
        let store = store_with_series();
        let record = store
            .resolve(&CountyKey::new("CA", "Alameda"), None)
            .unwrap();
        assert_eq!(record.value("cases"), Some(20.0));
    }

    #[test]
    fn resolves_exact_target_date() {
        let store = store_with_series();
        let record = store
            .resolve(&CountyKey::new("CA", "Alameda"), Some(date("2021-01-01")))
            .unwrap();
        assert_eq!(record.value("cases"), Some(10.0));
    }

    #[test]
    fn no_nearest_date_fallback() {
        let store = store_with_series();
        assert!(
            store
                .resolve(&CountyKey::new("CA", "Alameda"), Some(date("2021-01-03")))
                .is_none()
        );
    }

    #[test]
    fn unknown_county_resolves_to_none() {
        let store = store_with_series();
        assert!(store.resolve(&CountyKey::new("NV", "Clark"), None).is_none());
    }

    #[test]
    fn duplicate_row_replaces() {
        let mut store = StatStore::new(vec!["cases".to_string()]);
        let key = CountyKey::new("CA", "Alameda");
        store.ingest(key.clone(), date("2021-01-01"), record("06001", 10.0));
        store.ingest(key.clone(), date("2021-01-01"), record("06001", 30.0));

        let resolved = store.resolve(&key, None).unwrap();
        assert_eq!(resolved.value("cases"), Some(30.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn fips_ignores_target_date() {
        let store = store_with_series();
        assert_eq!(store.fips(&CountyKey::new("CA", "Alameda")), Some("06001"));
        assert_eq!(store.fips(&CountyKey::new("NV", "Clark")), None);
    }

    #[test]
    fn statistic_name_queries() {
        let store = StatStore::new(vec!["cases".to_string(), "deaths".to_string()]);
        assert!(store.has_statistic("deaths"));
        assert!(!store.has_statistic("recoveries"));
        assert_eq!(store.statistic_names(), ["cases", "deaths"]);
    }
}

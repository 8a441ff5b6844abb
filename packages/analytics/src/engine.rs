//! Statistic aggregation over resolved query regions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use covid_map_analytics_models::{
    AggregateResult, BatchOutput, RadiusQuery, RegionSummary, RegionValue,
};
use covid_map_geo::GeoIndex;
use covid_map_stats::StatStore;

use crate::{AnalyticsError, region};

/// Aggregates statistics over radius queries against immutable geo and
/// statistic stores.
pub struct AggregationEngine<'a> {
    geo: &'a GeoIndex,
    stats: &'a StatStore,
}

impl<'a> AggregationEngine<'a> {
    /// Creates an engine over fully built stores.
    #[must_use]
    pub const fn new(geo: &'a GeoIndex, stats: &'a StatStore) -> Self {
        Self { geo, stats }
    }

    /// Runs a single query.
    ///
    /// Member counties missing from the statistics data (or missing the
    /// requested value) contribute zero to the raw total, but their
    /// population still counts toward the density denominator, so sparse
    /// statistic coverage never skews the rate. Density is `None` when
    /// the region has no population at all; a zero rate over a real
    /// population stays `Some(0.0)`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownStatistic`] if the dataset header
    /// does not declare `statistic`, or
    /// [`AnalyticsError::TargetNotGeolocatable`] if the target county has
    /// no geocode record.
    pub fn aggregate(
        &self,
        query: &RadiusQuery,
        target_date: Option<NaiveDate>,
        statistic: &str,
    ) -> Result<AggregateResult, AnalyticsError> {
        if !self.stats.has_statistic(statistic) {
            return Err(AnalyticsError::UnknownStatistic {
                name: statistic.to_string(),
                available: self.stats.statistic_names().join(", "),
            });
        }

        let selection = region::resolve_region(self.geo, query)?;

        let mut raw_total = 0.0;
        let mut total_population = 0u64;
        let mut fips = Vec::new();

        for member in &selection.members {
            // Members come from the index scan, so the lookup cannot miss.
            let Some(geo_record) = self.geo.lookup(member) else {
                continue;
            };
            total_population += geo_record.population;

            if let Some(record) = self.stats.resolve(member, target_date) {
                raw_total += record.value(statistic).unwrap_or(0.0);
            } else {
                log::debug!("No statistics for {member}; counting population only");
            }

            if let Some(code) = self.stats.fips(member) {
                fips.push(code.to_string());
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let density = if total_population > 0 {
            Some(raw_total / (total_population as f64 / 100_000.0))
        } else {
            None
        };

        Ok(AggregateResult {
            query: query.clone(),
            members: selection.members,
            raw_total,
            total_population,
            density,
            fips,
        })
    }

    /// Runs a batch of queries in input order and merges the per-county
    /// values into one mapping, later queries overwriting earlier ones
    /// where regions overlap.
    ///
    /// # Errors
    ///
    /// Fails on the first unresolvable query; no partial output is
    /// produced.
    pub fn run_batch(
        &self,
        queries: &[RadiusQuery],
        target_date: Option<NaiveDate>,
        statistic: &str,
    ) -> Result<BatchOutput, AnalyticsError> {
        let mut values: BTreeMap<String, RegionValue> = BTreeMap::new();
        let mut regions = Vec::with_capacity(queries.len());

        for query in queries {
            let result = self.aggregate(query, target_date, statistic)?;

            log::info!(
                "{} {statistic} within {:.2} mi of {}: {} counties, {} people",
                result.raw_total,
                query.radius_miles,
                query.target,
                result.members.len(),
                result.total_population,
            );

            let value = RegionValue {
                raw_total: result.raw_total,
                density: result.density,
            };
            for code in &result.fips {
                values.insert(code.clone(), value);
            }

            regions.push(RegionSummary {
                target: query.target.clone(),
                radius_miles: query.radius_miles,
                members: result.members.iter().cloned().collect(),
                raw_total: result.raw_total,
                total_population: result.total_population,
                density: result.density,
            });
        }

        Ok(BatchOutput {
            statistic: statistic.to_string(),
            target_date,
            values,
            regions,
        })
    }
}

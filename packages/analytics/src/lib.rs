#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Radius query resolution and statistic aggregation.
//!
//! Answers "how much of statistic S within D miles of county C" against
//! the immutable location index and statistic store. Location gaps on the
//! query target are fatal (no coordinate means no radius is computable);
//! statistic gaps on member counties are tolerated and contribute zero.

pub mod engine;
pub mod region;

pub use engine::AggregationEngine;
pub use region::resolve_region;

use covid_map_geo_models::CountyKey;
use thiserror::Error;

/// Errors that abort a query batch.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The query's target county has no geocode record, so no radius is
    /// computable.
    #[error("County {target} not found in location data")]
    TargetNotGeolocatable {
        /// The unresolvable target county.
        target: CountyKey,
    },

    /// The requested statistic is not declared by the dataset header.
    #[error("Statistic {name} not found in data inputs (available: {available})")]
    UnknownStatistic {
        /// The requested statistic name.
        name: String,
        /// Comma-separated statistics the dataset does declare.
        available: String,
    },
}

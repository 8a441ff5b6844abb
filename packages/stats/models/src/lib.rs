#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-county statistic record types.
//!
//! The set of statistic names is dataset-driven: every column after the
//! fixed `date,county,state,fips` prefix of the source header becomes a
//! statistic. Values therefore live in a name → value map rather than
//! fixed fields, so new source columns show up without code changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Statistics reported for one county on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRecord {
    /// County FIPS code as it appears in the source row.
    pub fips: String,
    /// Statistic name → numeric value. A name missing from the map means
    /// the source row carried no usable value for it.
    pub values: BTreeMap<String, f64>,
}

impl StatRecord {
    /// Returns the named statistic's value, if this record carries one.
    #[must_use]
    pub fn value(&self, statistic: &str) -> Option<f64> {
        self.values.get(statistic).copied()
    }
}

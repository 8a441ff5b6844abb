#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV ingestion for the covid-map input schemas.
//!
//! Three readers, one per schema: county geocodes, county statistics, and
//! the radius request list. The readers are thin; they parse and validate
//! rows, then feed the in-memory stores. Malformed rows in the two dataset
//! files are tolerated (warn and skip), while any malformed request row
//! aborts the run before queries execute, since partial batch output
//! would be misleading.

pub mod counties;
pub mod geocodes;
pub mod progress;
pub mod requests;

use thiserror::Error;

/// Errors that abort ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Reading an input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A CSV stream could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The statistics header does not start with the fixed column prefix.
    #[error("Column name {found:?} does not match {expected:?} (column {position})")]
    Header {
        /// Name found in the file header.
        found: String,
        /// Name the schema requires at this position.
        expected: String,
        /// Zero-based column position.
        position: usize,
    },

    /// A request-list row is malformed.
    #[error("Invalid request data (row {row}): {message}")]
    InvalidRequest {
        /// One-based data row number.
        row: usize,
        /// What was wrong with the row.
        message: String,
    },
}

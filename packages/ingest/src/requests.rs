//! Reader for the radius request list.
//!
//! Rows of `county, state, distance_in_miles` after a header line. Unlike
//! the dataset readers, any malformed row here is fatal: a bad request
//! means the user asked for something the run cannot answer, and partial
//! batch output would be misleading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use covid_map_analytics_models::RadiusQuery;
use covid_map_geo_models::{CountyKey, states};

use crate::IngestError;

/// Loads the request list from a file path.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be opened or any row is
/// malformed.
pub fn load_path(path: &Path) -> Result<Vec<RadiusQuery>, IngestError> {
    let file = File::open(path)?;
    load_reader(file)
}

/// Parses the request list into validated queries, preserving file order.
///
/// States are accepted as USPS abbreviations or full names.
///
/// # Errors
///
/// Returns [`IngestError::InvalidRequest`] for any row with missing
/// fields, an empty county, an unknown state, or a distance outside
/// `[0, 1000)` miles.
pub fn load_reader<R: Read>(reader: R) -> Result<Vec<RadiusQuery>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut queries = Vec::new();

    for (row_number, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row = row_number + 1;

        let county = record.get(0).unwrap_or_default().trim();
        let state_field = record.get(1).unwrap_or_default().trim();
        let distance_field = record.get(2).unwrap_or_default().trim();

        if record.len() < 3 || county.is_empty() || state_field.is_empty() {
            return Err(IngestError::InvalidRequest {
                row,
                message: "expected county, state, distance_in_miles".to_string(),
            });
        }

        let state =
            normalize_state(state_field).ok_or_else(|| IngestError::InvalidRequest {
                row,
                message: format!("unknown state {state_field:?}"),
            })?;

        let distance: f64 =
            distance_field
                .parse()
                .map_err(|_| IngestError::InvalidRequest {
                    row,
                    message: format!("unparseable distance {distance_field:?}"),
                })?;

        let query = RadiusQuery::new(CountyKey::new(&state, county), distance).map_err(
            |err| IngestError::InvalidRequest {
                row,
                message: err.to_string(),
            },
        )?;
        queries.push(query);
    }

    log::info!("Parsed {} radius requests", queries.len());

    Ok(queries)
}

/// Accepts either a USPS abbreviation or a full state name.
fn normalize_state(field: &str) -> Option<String> {
    if field.len() == 2 {
        Some(field.to_uppercase())
    } else {
        states::abbreviation_for(field).map(str::to_string)
    }
}

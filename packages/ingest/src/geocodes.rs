//! Reader for the county geocode dataset.
//!
//! One row per city, with multiple rows per county expected. The columns
//! this reader uses sit at fixed, documented positions of the 12-column
//! Healthcare.gov export; the file is slow-moving reference data, so the
//! layout is asserted rather than auto-detected.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use covid_map_geo::GeoIndex;
use covid_map_geo_models::CityObservation;

use crate::IngestError;
use crate::progress::ProgressCallback;

/// Column position of the two-letter state abbreviation.
pub const COLUMN_STATE: usize = 2;
/// Column position of the city latitude.
pub const COLUMN_LATITUDE: usize = 3;
/// Column position of the city longitude.
pub const COLUMN_LONGITUDE: usize = 4;
/// Column position of the county name.
pub const COLUMN_COUNTY: usize = 5;
/// Column position of the estimated city population.
pub const COLUMN_POPULATION: usize = 10;
/// Number of columns in the export.
pub const COLUMN_COUNT: usize = 12;

/// Loads the geocode dataset from a file path.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be opened or its CSV stream
/// cannot be read.
pub fn load_path(path: &Path, progress: &dyn ProgressCallback) -> Result<GeoIndex, IngestError> {
    let file = File::open(path)?;
    load_reader(file, progress)
}

/// Builds a [`GeoIndex`] from geocode CSV data.
///
/// Rows that are too short or carry unusable coordinates or populations
/// are warned about and skipped; rows with an empty county name are
/// dropped silently by the index.
///
/// # Errors
///
/// Returns [`IngestError`] if the CSV stream itself cannot be read.
pub fn load_reader<R: Read>(
    reader: R,
    progress: &dyn ProgressCallback,
) -> Result<GeoIndex, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut index = GeoIndex::new();
    let mut skipped = 0usize;

    for (row_number, result) in csv_reader.records().enumerate() {
        let record = result?;
        progress.inc(1);

        if let Some(observation) = parse_row(&record) {
            index.ingest(&observation);
        } else {
            log::warn!("Incomplete geocode data for row {}; skipping", row_number + 1);
            skipped += 1;
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} malformed geocode rows");
    }
    progress.finish(format!("Loaded {} counties from geocode data", index.len()));

    Ok(index)
}

/// Extracts a [`CityObservation`] from one raw row, or `None` when the
/// row is too short or its values cannot be used.
fn parse_row(record: &csv::StringRecord) -> Option<CityObservation> {
    if record.len() < COLUMN_COUNT {
        return None;
    }

    let latitude: f64 = record.get(COLUMN_LATITUDE)?.trim().parse().ok()?;
    let longitude: f64 = record.get(COLUMN_LONGITUDE)?.trim().parse().ok()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }

    // Decommissioned entries leave the population blank; they still
    // locate the county.
    let population_field = record.get(COLUMN_POPULATION)?.trim();
    let population: u64 = if population_field.is_empty() {
        0
    } else {
        population_field.parse().ok()?
    };

    Some(CityObservation {
        state: record.get(COLUMN_STATE)?.to_string(),
        county: record.get(COLUMN_COUNTY)?.to_string(),
        latitude,
        longitude,
        population,
    })
}

//! Reader for the per-county statistics dataset.
//!
//! Handles both the "live" (latest snapshot only) and "all" (full time
//! series) variants of the NY Times county data: the four fixed leading
//! columns are validated against the header and every remaining column
//! becomes an available statistic, so variant differences and future
//! columns need no code changes.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use covid_map_geo_models::{CountyKey, states};
use covid_map_stats::StatStore;
use covid_map_stats_models::StatRecord;

use crate::IngestError;
use crate::progress::ProgressCallback;

/// The fixed leading columns every dataset variant must declare.
pub const FIXED_COLUMNS: [&str; 4] = ["date", "county", "state", "fips"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loads the statistics dataset from a file path.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be opened, its CSV stream
/// cannot be read, or its header does not carry the fixed column prefix.
pub fn load_path(path: &Path, progress: &dyn ProgressCallback) -> Result<StatStore, IngestError> {
    let file = File::open(path)?;
    load_reader(file, progress)
}

/// Builds a [`StatStore`] from statistics CSV data.
///
/// The header's fixed prefix is validated and the remaining column names
/// become the store's statistic set. Rows with the wrong column count,
/// unparseable dates, or state names that cannot be abbreviated are
/// warned about and skipped; empty statistic cells count as zero.
///
/// # Errors
///
/// Returns [`IngestError::Header`] on a fixed-prefix mismatch, or an
/// I/O-or-CSV error if the stream cannot be read.
pub fn load_reader<R: Read>(
    reader: R,
    progress: &dyn ProgressCallback,
) -> Result<StatStore, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();
    let statistic_names = validate_header(&headers)?;
    let expected_len = FIXED_COLUMNS.len() + statistic_names.len();

    let mut store = StatStore::new(statistic_names.clone());

    for (row_number, result) in csv_reader.records().enumerate() {
        let record = result?;
        progress.inc(1);
        let row = row_number + 1;

        if record.len() != expected_len {
            log::warn!("Incomplete statistics data for row {row}; skipping");
            continue;
        }

        let date_field = record.get(0).unwrap_or_default().trim();
        let Ok(date) = NaiveDate::parse_from_str(date_field, DATE_FORMAT) else {
            log::warn!("Unparseable date {date_field:?} for row {row}; skipping");
            continue;
        };

        let county = record.get(1).unwrap_or_default();
        if county.trim().is_empty() {
            log::debug!("Skipping statistics row {row} with empty county name");
            continue;
        }

        // The statistics dataset spells states in full; the join key uses
        // the abbreviation the geocode dataset uses.
        let state_field = record.get(2).unwrap_or_default();
        let Some(state) = states::abbreviation_for(state_field) else {
            log::warn!("Unknown state {state_field:?} for row {row}; skipping");
            continue;
        };

        let fips = record.get(3).unwrap_or_default().trim().to_string();

        let mut values = BTreeMap::new();
        for (offset, name) in statistic_names.iter().enumerate() {
            let field = record
                .get(FIXED_COLUMNS.len() + offset)
                .unwrap_or_default()
                .trim();
            if field.is_empty() {
                // Blank cells mean "nothing reported", which downstream
                // arithmetic treats as zero.
                values.insert(name.clone(), 0.0);
            } else if let Ok(value) = field.parse::<f64>() {
                values.insert(name.clone(), value);
            } else {
                log::debug!("Unparseable {name} value {field:?} for row {row}");
            }
        }

        store.ingest(
            CountyKey::new(state, county),
            date,
            StatRecord { fips, values },
        );
    }

    progress.finish(format!("Loaded statistics for {} counties", store.len()));

    Ok(store)
}

/// Checks the fixed leading columns and returns the statistic names
/// declared after them.
fn validate_header(headers: &[String]) -> Result<Vec<String>, IngestError> {
    for (position, expected) in FIXED_COLUMNS.iter().enumerate() {
        let found = headers.get(position).map(String::as_str).unwrap_or_default();
        if !found.eq_ignore_ascii_case(expected) {
            return Err(IngestError::Header {
                found: found.to_string(),
                expected: (*expected).to_string(),
                position,
            });
        }
    }
    Ok(headers[FIXED_COLUMNS.len()..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;

    fn load(data: &str) -> Result<StatStore, IngestError> {
        load_reader(data.as_bytes(), &NullProgress)
    }

    #[test]
    fn statistic_names_come_from_the_header() {
        let store = load(concat!(
            "date,county,state,fips,cases,deaths,confirmed_cases\n",
            "2021-01-05,Alameda,California,06001,100,2,90\n",
        ))
        .unwrap();

        assert_eq!(
            store.statistic_names(),
            ["cases", "deaths", "confirmed_cases"]
        );
        let record = store
            .resolve(&CountyKey::new("CA", "Alameda"), None)
            .unwrap();
        assert_eq!(record.value("confirmed_cases"), Some(90.0));
        assert_eq!(record.fips, "06001");
    }

    #[test]
    fn header_prefix_mismatch_is_fatal() {
        let err = load("county,date,state,fips,cases\n").unwrap_err();
        assert!(matches!(
            err,
            IngestError::Header { position: 0, .. }
        ));
    }

    #[test]
    fn header_comparison_ignores_case_and_whitespace() {
        let store = load("Date, County ,STATE,fips,cases\n").unwrap();
        assert_eq!(store.statistic_names(), ["cases"]);
    }

    #[test]
    fn wrong_column_count_skips_the_row() {
        let store = load(concat!(
            "date,county,state,fips,cases,deaths\n",
            "2021-01-05,Alameda,California,06001,100\n",
            "2021-01-05,Marin,California,06041,50,1\n",
        ))
        .unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.resolve(&CountyKey::new("CA", "Marin"), None).is_some());
    }

    #[test]
    fn unknown_state_skips_the_row() {
        let store = load(concat!(
            "date,county,state,fips,cases\n",
            "2021-01-05,Alameda,Cascadia,06001,100\n",
        ))
        .unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn unparseable_date_skips_the_row() {
        let store = load(concat!(
            "date,county,state,fips,cases\n",
            "01/05/2021,Alameda,California,06001,100\n",
        ))
        .unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn empty_cells_count_as_zero() {
        let store = load(concat!(
            "date,county,state,fips,cases,deaths\n",
            "2021-01-05,Alameda,California,06001,100,\n",
        ))
        .unwrap();

        let record = store
            .resolve(&CountyKey::new("CA", "Alameda"), None)
            .unwrap();
        assert_eq!(record.value("deaths"), Some(0.0));
    }

    #[test]
    fn unparseable_cells_are_dropped_from_the_record() {
        let store = load(concat!(
            "date,county,state,fips,cases,deaths\n",
            "2021-01-05,Alameda,California,06001,100,n/a\n",
        ))
        .unwrap();

        let record = store
            .resolve(&CountyKey::new("CA", "Alameda"), None)
            .unwrap();
        assert_eq!(record.value("deaths"), None);
        assert_eq!(record.value("cases"), Some(100.0));
    }

    #[test]
    fn time_series_rows_accumulate_per_date() {
        let store = load(concat!(
            "date,county,state,fips,cases\n",
            "2021-01-01,Alameda,California,06001,10\n",
            "2021-01-05,Alameda,California,06001,20\n",
        ))
        .unwrap();

        let key = CountyKey::new("CA", "Alameda");
        assert_eq!(store.resolve(&key, None).unwrap().value("cases"), Some(20.0));
        let date = NaiveDate::parse_from_str("2021-01-01", "%Y-%m-%d").unwrap();
        assert_eq!(
            store.resolve(&key, Some(date)).unwrap().value("cases"),
            Some(10.0)
        );
    }
}

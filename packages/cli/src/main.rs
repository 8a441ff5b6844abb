#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Batch CLI for county radius aggregation.
//!
//! Joins the per-county statistics dataset with the county geocode
//! dataset, answers each radius request from the input file, and emits
//! the fips → value JSON document consumed by the external choropleth
//! renderer. Choropleth drawing, legends, and image export live outside
//! this workspace.

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use covid_map_analytics::AggregationEngine;
use covid_map_cli_utils::RowSpinner;
use covid_map_ingest::{counties, geocodes, requests};

#[derive(Parser)]
#[command(
    name = "covid-map",
    about = "Aggregate per-county statistics over radius queries"
)]
struct Cli {
    /// Path to the counties statistics CSV ("live" or "all" variant)
    #[arg(short = 'D', long, default_value = "input/us-counties-live.csv")]
    counties_data: PathBuf,

    /// Path to the county geocodes CSV
    #[arg(short = 'G', long, default_value = "input/geocodes.csv")]
    geocodes: PathBuf,

    /// Target date in yyyy-mm-dd format; defaults to the most recent date
    /// per county
    #[arg(short = 'T', long)]
    target_date: Option<String>,

    /// Statistic to aggregate (e.g. cases, deaths)
    #[arg(short = 'S', long)]
    statistic: String,

    /// Path to the request list CSV (county, state, distance_in_miles)
    #[arg(short = 'I', long)]
    input: PathBuf,

    /// Write the renderer JSON here instead of stdout
    #[arg(short = 'O', long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = covid_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let target_date = cli
        .target_date
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|err| format!("Invalid target date {raw:?}: {err}"))
        })
        .transpose()?;

    // Requests are parsed first so a malformed batch fails before the
    // datasets are loaded.
    let queries = requests::load_path(&cli.input)?;

    let spinner = RowSpinner::new(&multi, "Loading geocode data");
    let geo = geocodes::load_path(&cli.geocodes, spinner.as_ref())?;

    let spinner = RowSpinner::new(&multi, "Loading counties statistics");
    let stats = counties::load_path(&cli.counties_data, spinner.as_ref())?;

    let engine = AggregationEngine::new(&geo, &stats);
    let output = engine.run_batch(&queries, target_date, &cli.statistic)?;

    if let Some(path) = &cli.output {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &output)?;
        writer.flush()?;
        log::info!("Wrote renderer data to {}", path.display());
    } else {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &output)?;
        writeln!(stdout)?;
    }

    Ok(())
}

use canopy_core::error::CanopyError;
use canopy_core::risk::RiskOptions;
use canopy_core::AssessOptions;
use chrono::Utc;
use std::path::PathBuf;

use crate::output;

#[allow(clippy::too_many_arguments)]
pub fn run(
    input_file: PathBuf,
    catalog_file: Option<PathBuf>,
    forecast_file: Option<PathBuf>,
    tree_age: f64,
    top_species: usize,
    output_format: &str,
    verbose: bool,
) -> Result<(), CanopyError> {
    let reading = super::load_reading(&input_file)?;
    let catalog = super::load_catalog(catalog_file)?;
    let forecast = super::load_forecast(forecast_file)?;

    let options = AssessOptions {
        top_species,
        scenario: None,
        risk: RiskOptions {
            forecast,
            tree_age_years: tree_age,
        },
    };

    let report = canopy_core::assess_site(&reading, &catalog, &options, Utc::now());

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print(&report, verbose),
    }

    Ok(())
}

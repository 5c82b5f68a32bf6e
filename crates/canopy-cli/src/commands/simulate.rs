use canopy_core::error::CanopyError;
use canopy_core::risk::RiskOptions;
use canopy_core::scenario::{Intensity, ScenarioKind, ScenarioSpec};
use canopy_core::AssessOptions;
use chrono::Utc;
use std::path::PathBuf;

use crate::output;

#[allow(clippy::too_many_arguments)]
pub fn run(
    input_file: PathBuf,
    scenario: &str,
    intensity: &str,
    duration: u32,
    catalog_file: Option<PathBuf>,
    forecast_file: Option<PathBuf>,
    top_species: usize,
    output_format: &str,
) -> Result<(), CanopyError> {
    let spec = ScenarioSpec {
        kind: parse_kind(scenario)?,
        intensity: parse_intensity(intensity)?,
        duration_days: duration,
    };

    let reading = super::load_reading(&input_file)?;
    let catalog = super::load_catalog(catalog_file)?;
    let forecast = super::load_forecast(forecast_file)?;

    let now = Utc::now();
    let baseline_options = AssessOptions {
        top_species,
        risk: RiskOptions {
            forecast: forecast.clone(),
            ..Default::default()
        },
        ..Default::default()
    };
    let scenario_options = AssessOptions {
        top_species,
        scenario: Some(spec),
        risk: RiskOptions {
            forecast,
            ..Default::default()
        },
        ..Default::default()
    };

    let baseline = canopy_core::assess_site(&reading, &catalog, &baseline_options, now);
    let simulated = canopy_core::assess_site(&reading, &catalog, &scenario_options, now);

    match output_format {
        "json" => output::json::print_comparison(&baseline, &simulated)?,
        _ => output::table::print_comparison(&baseline, &simulated, &spec),
    }

    Ok(())
}

fn parse_kind(s: &str) -> Result<ScenarioKind, CanopyError> {
    match s.trim().to_lowercase().as_str() {
        "drought" => Ok(ScenarioKind::Drought),
        "flood" => Ok(ScenarioKind::Flood),
        "heat" => Ok(ScenarioKind::Heat),
        "species_failure" | "species-failure" => Ok(ScenarioKind::SpeciesFailure),
        other => Err(CanopyError::ReadingParse(format!(
            "unknown scenario '{other}' (expected drought, flood, heat or species_failure)"
        ))),
    }
}

fn parse_intensity(s: &str) -> Result<Intensity, CanopyError> {
    match s.trim().to_lowercase().as_str() {
        "low" => Ok(Intensity::Low),
        "medium" => Ok(Intensity::Medium),
        "high" => Ok(Intensity::High),
        other => Err(CanopyError::ReadingParse(format!(
            "unknown intensity '{other}' (expected low, medium or high)"
        ))),
    }
}

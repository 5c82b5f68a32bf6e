//! What-if scenario simulator. Applies hypothetical stress multipliers to a
//! clone of a reading; the input is never mutated, so a simulated reading can
//! be fed straight back into the scoring and risk pipelines.

use crate::model::{EnvironmentalReading, ForecastDay};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Drought,
    Flood,
    Heat,
    SpeciesFailure,
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioKind::Drought => write!(f, "drought"),
            ScenarioKind::Flood => write!(f, "flood"),
            ScenarioKind::Heat => write!(f, "heat"),
            ScenarioKind::SpeciesFailure => write!(f, "species_failure"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

impl Intensity {
    /// Stress multiplier applied to every perturbation factor.
    pub fn multiplier(self) -> f64 {
        match self {
            Intensity::Low => 1.0,
            Intensity::Medium => 1.2,
            Intensity::High => 1.5,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intensity::Low => write!(f, "low"),
            Intensity::Medium => write!(f, "medium"),
            Intensity::High => write!(f, "high"),
        }
    }
}

/// A hypothetical stress event to overlay on current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    #[serde(rename = "type")]
    pub kind: ScenarioKind,
    #[serde(default)]
    pub intensity: Intensity,
    /// Informational; perturbation magnitude depends only on intensity.
    #[serde(default = "default_duration")]
    pub duration_days: u32,
}

fn default_duration() -> u32 {
    30
}

/// Apply a scenario to a reading, returning the perturbed copy.
///
/// All fields are re-clamped to their valid ranges afterwards, so the output
/// satisfies the same invariants as any normalized reading.
pub fn apply_scenario(
    reading: &EnvironmentalReading,
    scenario: &ScenarioSpec,
) -> EnvironmentalReading {
    let mut out = reading.clone();
    let k = scenario.intensity.multiplier();

    match scenario.kind {
        ScenarioKind::Drought => {
            out.climate.rainfall_mm *= 1.0 - 0.7 * k;
            out.climate.humidity_pct *= 1.0 - 0.3 * k;
            out.soil.moisture_pct *= 1.0 - 0.4 * k;
            out.vegetation.health_score *= 1.0 - 0.2 * k;
            out.vegetation.ndvi *= 1.0 - 0.15 * k;
        }
        ScenarioKind::Flood => {
            out.climate.rainfall_mm *= 1.0 + 2.0 * k;
            out.climate.humidity_pct = (out.climate.humidity_pct * 1.2).min(100.0);
            out.soil.moisture_pct = (out.soil.moisture_pct * (1.0 + 0.5 * k)).min(100.0);
        }
        ScenarioKind::Heat => {
            out.climate.avg_temp_c *= 1.0 + 0.2 * k;
            out.climate.min_temp_c *= 1.0 + 0.2 * k;
            out.climate.max_temp_c *= 1.0 + 0.2 * k;
            out.climate.humidity_pct *= 1.0 - 0.2 * k;
            out.vegetation.health_score *= 1.0 - 0.15 * k;
        }
        ScenarioKind::SpeciesFailure => {
            out.vegetation.health_score *= 1.0 - 0.4 * k;
            out.vegetation.ndvi *= 1.0 - 0.3 * k;
            out.vegetation.coverage_pct *= 1.0 - 0.35 * k;
        }
    }

    reclamp(&mut out);
    out
}

/// Apply a scenario to forecast data, returning the perturbed copy.
///
/// Forecast days carry the same weather signals as the reading, so a
/// scenario must distort both: otherwise a forecast-aware hazard scorer
/// would read unperturbed weather and undercut the scenario.
pub fn apply_scenario_forecast(forecast: &[ForecastDay], scenario: &ScenarioSpec) -> Vec<ForecastDay> {
    let k = scenario.intensity.multiplier();

    forecast
        .iter()
        .map(|day| {
            let mut day = *day;
            match scenario.kind {
                ScenarioKind::Drought => {
                    day.precipitation_mm *= 1.0 - 0.7 * k;
                    day.humidity_pct *= 1.0 - 0.3 * k;
                }
                ScenarioKind::Flood => {
                    day.precipitation_mm *= 1.0 + 2.0 * k;
                    day.humidity_pct = (day.humidity_pct * 1.2).min(100.0);
                }
                ScenarioKind::Heat => {
                    day.temp_c *= 1.0 + 0.2 * k;
                    day.humidity_pct *= 1.0 - 0.2 * k;
                }
                ScenarioKind::SpeciesFailure => {}
            }
            day.precipitation_mm = day.precipitation_mm.max(0.0);
            day.humidity_pct = day.humidity_pct.clamp(0.0, 100.0);
            day.temp_c = day.temp_c.clamp(-50.0, 60.0);
            day
        })
        .collect()
}

fn reclamp(reading: &mut EnvironmentalReading) {
    let soil = &mut reading.soil;
    soil.ph = soil.ph.clamp(3.0, 10.0);
    soil.moisture_pct = soil.moisture_pct.clamp(0.0, 100.0);
    soil.organic_matter_pct = soil.organic_matter_pct.clamp(0.0, 100.0);
    soil.clay_pct = soil.clay_pct.clamp(0.0, 100.0);
    soil.sand_pct = soil.sand_pct.clamp(0.0, 100.0);

    let climate = &mut reading.climate;
    climate.avg_temp_c = climate.avg_temp_c.clamp(-50.0, 60.0);
    climate.min_temp_c = climate.min_temp_c.clamp(-60.0, 50.0);
    climate.max_temp_c = climate.max_temp_c.clamp(-40.0, 70.0);
    climate.rainfall_mm = climate.rainfall_mm.clamp(0.0, 12000.0);
    climate.humidity_pct = climate.humidity_pct.clamp(0.0, 100.0);
    climate.growing_season_days = climate.growing_season_days.clamp(0.0, 366.0);
    climate.wind_speed_kmh = climate.wind_speed_kmh.map(|w| w.clamp(0.0, 200.0));

    let veg = &mut reading.vegetation;
    veg.ndvi = veg.ndvi.clamp(-1.0, 1.0);
    veg.evi = veg.evi.clamp(-1.0, 1.0);
    veg.health_score = veg.health_score.clamp(0.0, 100.0);
    veg.coverage_pct = veg.coverage_pct.clamp(0.0, 100.0);
    veg.change_rate_pct = veg.change_rate_pct.clamp(-100.0, 100.0);
}

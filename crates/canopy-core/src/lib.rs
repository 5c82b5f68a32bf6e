//! Decision engine for ecological restoration sites.
//!
//! The pipeline is a pure function of its inputs: raw environmental payloads
//! are normalized into a canonical reading, which feeds a suitability scorer,
//! a species matcher, a multi-hazard risk fusion and an optional what-if
//! scenario overlay. [`assess_site`] runs all stages and bundles the results
//! into one report.

pub mod error;
pub mod model;
pub mod normalize;
pub mod risk;
pub mod scenario;
pub mod species;
pub mod suitability;

pub use error::CanopyError;
pub use model::EnvironmentalReading;

use chrono::{DateTime, Utc};
use risk::{RiskAssessment, RiskOptions};
use scenario::ScenarioSpec;
use serde::{Deserialize, Serialize};
use species::{SpeciesCatalog, SpeciesRecommendation};
use suitability::SuitabilityResult;
use tracing::debug;

/// Deterministic rule-based stages carry this fixed confidence when they have
/// no data-quality signal of their own.
const RULE_STAGE_CONFIDENCE: f64 = 0.9;

/// Options for a full site assessment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessOptions {
    /// Maximum number of species recommendations. Zero means the default of 5.
    #[serde(default)]
    pub top_species: usize,
    /// Hypothetical stress event applied to the reading before any scoring.
    #[serde(default)]
    pub scenario: Option<ScenarioSpec>,
    #[serde(default)]
    pub risk: RiskOptions,
}

impl AssessOptions {
    fn top_species_or_default(&self) -> usize {
        if self.top_species == 0 {
            5
        } else {
            self.top_species
        }
    }
}

/// Combined output of every pipeline stage for one site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteAssessment {
    /// The reading all stages were scored against. If a scenario was
    /// requested this is the perturbed copy, not the caller's input.
    pub reading: EnvironmentalReading,
    pub suitability: SuitabilityResult,
    pub species: Vec<SpeciesRecommendation>,
    pub risk: RiskAssessment,
    /// Mean of per-stage confidences, [0, 1].
    pub aggregate_confidence: f64,
    pub generated_at: DateTime<Utc>,
}

/// Run the full pipeline over one reading.
///
/// Every stage sees the same reading: when a scenario is given, the
/// perturbation is applied once up front and suitability, species and risk
/// all score the perturbed conditions. The timestamp is injected so callers
/// control it and results stay reproducible.
pub fn assess_site(
    reading: &EnvironmentalReading,
    catalog: &SpeciesCatalog,
    options: &AssessOptions,
    now: DateTime<Utc>,
) -> SiteAssessment {
    // A scenario must distort the forecast along with the reading, or the
    // forecast-aware hazard scorers would see unperturbed weather.
    let (reading, risk_options) = match &options.scenario {
        Some(spec) => {
            debug!(kind = %spec.kind, intensity = %spec.intensity, "applying scenario");
            let risk_options = RiskOptions {
                forecast: options
                    .risk
                    .forecast
                    .as_deref()
                    .map(|days| scenario::apply_scenario_forecast(days, spec)),
                tree_age_years: options.risk.tree_age_years,
            };
            (scenario::apply_scenario(reading, spec), risk_options)
        }
        None => (reading.clone(), options.risk.clone()),
    };

    let suitability = suitability::score(&reading);
    debug!(score = suitability.overall_score, band = %suitability.band, "suitability scored");

    let species = species::recommend(&reading, catalog, options.top_species_or_default());
    debug!(candidates = species.len(), "species matched");

    let risk = risk::assess(&reading, &risk_options);
    debug!(score = risk.final_score, level = %risk.level, "risk assessed");

    let aggregate_confidence = (reading.source_confidence.mean()
        + RULE_STAGE_CONFIDENCE
        + RULE_STAGE_CONFIDENCE
        + f64::from(risk.confidence) / 100.0)
        / 4.0;

    SiteAssessment {
        reading,
        suitability,
        species,
        risk,
        aggregate_confidence,
        generated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::scenario::{Intensity, ScenarioKind};
    use approx::assert_relative_eq;

    fn defaults() -> (EnvironmentalReading, SpeciesCatalog) {
        (
            normalize(None, None, None),
            species::catalog::load_builtin().unwrap(),
        )
    }

    #[test]
    fn assessment_bundles_all_stages() {
        let (reading, catalog) = defaults();
        let now = Utc::now();
        let report = assess_site(&reading, &catalog, &AssessOptions::default(), now);

        assert_eq!(report.generated_at, now);
        assert!(report.suitability.overall_score <= 100);
        assert!(!report.species.is_empty());
        assert!(report.species.len() <= 5);
        assert!(report.risk.confidence >= 50);
        assert!(report.aggregate_confidence > 0.0 && report.aggregate_confidence <= 1.0);
    }

    #[test]
    fn aggregate_confidence_is_stage_mean() {
        let (reading, catalog) = defaults();
        let report = assess_site(&reading, &catalog, &AssessOptions::default(), Utc::now());

        // Defaulted sources: mean 0.8. No forecast, three degraded sources:
        // risk confidence floors at 50.
        let expected = (0.8 + 0.9 + 0.9 + 0.5) / 4.0;
        assert_relative_eq!(report.aggregate_confidence, expected, epsilon = 1e-9);
    }

    #[test]
    fn scenario_perturbs_the_scored_reading() {
        let (reading, catalog) = defaults();
        let options = AssessOptions {
            scenario: Some(ScenarioSpec {
                kind: ScenarioKind::Drought,
                intensity: Intensity::High,
                duration_days: 30,
            }),
            ..Default::default()
        };
        let report = assess_site(&reading, &catalog, &options, Utc::now());
        let baseline = assess_site(&reading, &catalog, &AssessOptions::default(), Utc::now());

        assert_relative_eq!(report.reading.soil.moisture_pct, 24.0, epsilon = 1e-9);
        assert!(report.risk.final_score > baseline.risk.final_score);
        // Caller's reading untouched.
        assert_relative_eq!(reading.soil.moisture_pct, 60.0);
    }

    #[test]
    fn scenario_perturbs_forecast_before_risk() {
        let (reading, catalog) = defaults();
        let wet_forecast = vec![
            crate::model::ForecastDay {
                temp_c: 26.0,
                precipitation_mm: 8.0,
                humidity_pct: 80.0,
            };
            14
        ];
        let scenario = ScenarioSpec {
            kind: ScenarioKind::Drought,
            intensity: Intensity::High,
            duration_days: 30,
        };
        let with_forecast = AssessOptions {
            scenario: Some(scenario),
            risk: RiskOptions {
                forecast: Some(wet_forecast),
                tree_age_years: 1.0,
            },
            ..Default::default()
        };
        let without_forecast = AssessOptions {
            scenario: Some(scenario),
            ..Default::default()
        };

        let a = assess_site(&reading, &catalog, &with_forecast, Utc::now());
        let b = assess_site(&reading, &catalog, &without_forecast, Utc::now());

        // The drought scenario dries the forecast out too: a wet forecast
        // must not mute the scenario's rainfall collapse.
        let drought = |r: &SiteAssessment| {
            r.risk
                .breakdown
                .iter()
                .find(|h| h.kind == risk::HazardKind::Drought)
                .unwrap()
                .score
        };
        assert!(drought(&a) >= 70.0, "drought scored {}", drought(&a));
        assert!(drought(&a) >= drought(&b));
    }

    #[test]
    fn top_species_zero_falls_back_to_five() {
        let options = AssessOptions::default();
        assert_eq!(options.top_species_or_default(), 5);
        let options = AssessOptions {
            top_species: 2,
            ..Default::default()
        };
        assert_eq!(options.top_species_or_default(), 2);
    }
}

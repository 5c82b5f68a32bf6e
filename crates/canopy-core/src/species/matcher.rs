//! Species compatibility matcher: evaluates every catalog species against a
//! normalized reading and returns a ranked, filtered recommendation list with
//! deterministic human-readable reasoning.

use crate::model::{EnvironmentalReading, RainfallCategory};
use crate::species::catalog::{DroughtTolerance, GrowthRate, SpeciesCatalog, SpeciesProfile};
use serde::{Deserialize, Serialize};

/// Species below this survival probability are never recommended.
const MIN_VIABILITY: f64 = 0.30;
/// Survival probability is capped below certainty: conditions always carry
/// residual risk no matter how good the match.
const SURVIVAL_CAP: f64 = 0.95;

/// Which of the five independent compatibility checks a species passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityFactors {
    pub ph: bool,
    pub rainfall: bool,
    pub temperature: bool,
    pub drought: bool,
    pub soil: bool,
}

/// A single ranked recommendation, ephemeral per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesRecommendation {
    pub profile: SpeciesProfile,
    /// Estimated establishment likelihood, (0, 0.95].
    pub survival_probability: f64,
    /// Survival probability plus growth/carbon/biodiversity bonuses.
    pub match_score: f64,
    pub reason: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub factors: CompatibilityFactors,
}

/// Rank catalog species against a reading.
///
/// Returns at most `top_n` entries, sorted by descending match score with
/// ties broken by catalog order. An empty catalog yields an empty list.
pub fn recommend(
    reading: &EnvironmentalReading,
    catalog: &SpeciesCatalog,
    top_n: usize,
) -> Vec<SpeciesRecommendation> {
    let rainfall_category = RainfallCategory::from_annual_mm(reading.climate.rainfall_mm);

    let mut viable: Vec<SpeciesRecommendation> = catalog
        .species
        .iter()
        .map(|sp| score_species(sp, reading, rainfall_category))
        .filter(|rec| rec.survival_probability > MIN_VIABILITY)
        .collect();

    // Stable sort keeps catalog order on ties.
    viable.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    viable.truncate(top_n);
    viable
}

fn score_species(
    species: &SpeciesProfile,
    reading: &EnvironmentalReading,
    rainfall_category: RainfallCategory,
) -> SpeciesRecommendation {
    let soil = &reading.soil;
    let climate = &reading.climate;

    let factors = CompatibilityFactors {
        ph: soil.ph >= species.ph_range[0] && soil.ph <= species.ph_range[1],
        rainfall: rainfall_compatible(species, rainfall_category, climate.rainfall_mm),
        temperature: climate.avg_temp_c >= species.temperature_range_c[0]
            && climate.avg_temp_c <= species.temperature_range_c[1],
        drought: species.drought_tolerance.rank() >= climate.drought_risk.rank(),
        soil: soil_compatible(&species.soil_preference, &soil.texture),
    };

    // Unsatisfied factors still contribute a small floor: a mismatch lowers
    // the estimate, it does not zero it out.
    let survival = (factor_points(factors.ph, 0.25)
        + factor_points(factors.rainfall, 0.25)
        + factor_points(factors.temperature, 0.20)
        + factor_points(factors.drought, 0.20)
        + if factors.soil { 0.10 } else { 0.02 })
    .min(SURVIVAL_CAP);

    let carbon_bonus = (species.carbon_sequestration_rate / 100.0).min(0.10);
    let biodiversity_bonus = (species.biodiversity_value / 100.0).min(0.05);
    let match_score = survival + species.growth_rate.bonus() + carbon_bonus + biodiversity_bonus;

    let (reason, pros, cons) = build_reasoning(species, reading, factors, survival);

    SpeciesRecommendation {
        profile: species.clone(),
        survival_probability: survival,
        match_score,
        reason,
        pros,
        cons,
        factors,
    }
}

fn factor_points(satisfied: bool, weight: f64) -> f64 {
    if satisfied {
        weight
    } else {
        0.05
    }
}

fn rainfall_compatible(
    species: &SpeciesProfile,
    category: RainfallCategory,
    rainfall_mm: f64,
) -> bool {
    species.rainfall_category == category
        && rainfall_mm >= species.rainfall_range_mm[0]
        && rainfall_mm <= species.rainfall_range_mm[1]
}

/// Loose texture matching: substring containment in either direction, plus
/// two domain equivalences (well-drained preferences accept sandy textures,
/// any loam preference accepts any loam texture).
fn soil_compatible(preference: &str, texture: &str) -> bool {
    let pref = preference.to_lowercase();
    let tex = texture.to_lowercase();
    pref.contains(&tex)
        || tex.contains(&pref)
        || (pref == "well_drained" && tex.contains("sandy"))
        || (pref.contains("loam") && tex.contains("loam"))
}

fn build_reasoning(
    species: &SpeciesProfile,
    reading: &EnvironmentalReading,
    factors: CompatibilityFactors,
    survival: f64,
) -> (String, Vec<String>, Vec<String>) {
    let mut pros = Vec::new();
    let mut cons = Vec::new();

    if factors.ph {
        pros.push(format!(
            "Soil pH ({:.1}) is within range for {}",
            reading.soil.ph, species.name
        ));
    } else {
        cons.push(format!(
            "Soil pH ({:.1}) is outside the tolerated range [{:.1}, {:.1}]",
            reading.soil.ph, species.ph_range[0], species.ph_range[1]
        ));
    }

    if factors.rainfall {
        pros.push(format!(
            "Rainfall ({:.0} mm/yr) matches requirements",
            reading.climate.rainfall_mm
        ));
    } else {
        cons.push("Rainfall conditions may not be ideal".to_string());
    }

    if factors.temperature {
        pros.push(format!(
            "Temperature ({:.1} C) is within the ideal range",
            reading.climate.avg_temp_c
        ));
    } else {
        cons.push("Temperature may stress the species".to_string());
    }

    if factors.drought {
        pros.push(format!(
            "{} drought tolerance covers the local {} drought risk",
            species.drought_tolerance, reading.climate.drought_risk
        ));
    } else {
        cons.push("Drought tolerance may be insufficient for local conditions".to_string());
    }

    if matches!(species.growth_rate, GrowthRate::Fast | GrowthRate::VeryFast) {
        pros.push("Fast growth rate provides quick results".to_string());
    }
    if species.carbon_sequestration_rate > 10.0 {
        pros.push(format!(
            "High carbon sequestration potential ({} t/ha/yr)",
            species.carbon_sequestration_rate
        ));
    }
    if species.maturity_years > 10.0 {
        cons.push(format!(
            "Long time to maturity ({} years)",
            species.maturity_years
        ));
    }

    let pct = (survival * 100.0).round() as u32;
    let mut reason = if survival > 0.8 {
        format!("Excellent match with {pct}% survival probability")
    } else if survival > 0.6 {
        format!("Good match with {pct}% survival probability")
    } else if survival > 0.4 {
        format!("Moderate match with {pct}% survival probability")
    } else {
        format!("Challenging conditions with {pct}% survival probability")
    };

    if species.drought_tolerance == DroughtTolerance::VeryHigh
        && reading.climate.drought_risk.rank() > 1
    {
        reason.push_str(", exceptional drought tolerance");
    }
    if species.growth_rate == GrowthRate::VeryFast {
        reason.push_str(", very fast growth for quick results");
    }

    (reason, pros, cons)
}

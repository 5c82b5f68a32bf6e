//! Suitability scorer: three independent banded sub-scores (soil, climate,
//! vegetation) fused with fixed 40/30/30 weights into a 0-100 site score and
//! a restoration priority tier.

use crate::model::{ClimateReading, DroughtRiskTier, EnvironmentalReading, NutrientLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vegetation condition is the strongest restoration-priority signal, hence
/// the heavier weight. The three weights sum to 1.0.
const VEGETATION_WEIGHT: f64 = 0.4;
const SOIL_WEIGHT: f64 = 0.3;
const CLIMATE_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityTier::Low => write!(f, "Low"),
            PriorityTier::Medium => write!(f, "Medium"),
            PriorityTier::High => write!(f, "High"),
        }
    }
}

/// Interpretation band for the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Moderate,
    Poor,
    VeryPoor,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> ScoreBand {
        if score >= 80 {
            ScoreBand::Excellent
        } else if score >= 60 {
            ScoreBand::Good
        } else if score >= 40 {
            ScoreBand::Moderate
        } else if score >= 20 {
            ScoreBand::Poor
        } else {
            ScoreBand::VeryPoor
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Highly suitable for restoration with minimal intervention",
            ScoreBand::Good => "Suitable for restoration with moderate preparation",
            ScoreBand::Moderate => "Requires significant site preparation and species selection",
            ScoreBand::Poor => "Challenging site requiring intensive restoration efforts",
            ScoreBand::VeryPoor => "Extremely challenging, may require alternative approaches",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Excellent => write!(f, "Excellent"),
            ScoreBand::Good => write!(f, "Good"),
            ScoreBand::Moderate => write!(f, "Moderate"),
            ScoreBand::Poor => write!(f, "Poor"),
            ScoreBand::VeryPoor => write!(f, "Very Poor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub soil: f64,
    pub climate: f64,
    pub vegetation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityResult {
    pub overall_score: u32,
    pub priority: PriorityTier,
    pub band: ScoreBand,
    pub component_scores: ComponentScores,
}

/// Score a normalized reading. Never fails: defaulted readings score like any
/// other and are flagged only through the reading's source confidence.
pub fn score(reading: &EnvironmentalReading) -> SuitabilityResult {
    let soil = soil_score(reading);
    let climate = climate_score(&reading.climate);
    let vegetation = vegetation_score(reading);

    let overall =
        (vegetation * VEGETATION_WEIGHT + soil * SOIL_WEIGHT + climate * CLIMATE_WEIGHT).round()
            as u32;

    SuitabilityResult {
        overall_score: overall,
        priority: priority_tier(reading.vegetation.ndvi, overall),
        band: ScoreBand::from_score(overall),
        component_scores: ComponentScores {
            soil,
            climate,
            vegetation,
        },
    }
}

fn nutrient_points(level: NutrientLevel) -> f64 {
    match level {
        NutrientLevel::High => 25.0,
        NutrientLevel::Medium => 18.0,
        NutrientLevel::Low => 10.0,
    }
}

/// Soil sub-score: pH band + N/P/K nutrient points (P and K discounted to
/// 0.8x and 0.7x of nitrogen's scale) + organic matter band + moisture band.
fn soil_score(reading: &EnvironmentalReading) -> f64 {
    let soil = &reading.soil;
    let mut score: f64 = 0.0;

    // pH, optimal 6.0-7.0
    score += if (6.0..=7.0).contains(&soil.ph) {
        25.0
    } else if (5.5..=7.5).contains(&soil.ph) {
        20.0
    } else if (5.0..=8.0).contains(&soil.ph) {
        15.0
    } else {
        10.0
    };

    score += nutrient_points(soil.nitrogen);
    score += nutrient_points(soil.phosphorus) * 0.8;
    score += nutrient_points(soil.potassium) * 0.7;

    score += if soil.organic_matter_pct >= 3.0 {
        15.0
    } else if soil.organic_matter_pct >= 2.0 {
        12.0
    } else if soil.organic_matter_pct >= 1.0 {
        8.0
    } else {
        5.0
    };

    // Moisture, optimal 50-70%
    score += if (50.0..=70.0).contains(&soil.moisture_pct) {
        10.0
    } else if (40.0..=80.0).contains(&soil.moisture_pct) {
        7.0
    } else {
        3.0
    };

    score.clamp(0.0, 100.0)
}

/// Climate sub-score: temperature, rainfall, humidity, drought tier and
/// growing-season bands, with an inverse wind deduction when wind data exists.
fn climate_score(climate: &ClimateReading) -> f64 {
    let mut score: f64 = 0.0;

    // Temperature, optimal 22-30 C
    score += if (22.0..=30.0).contains(&climate.avg_temp_c) {
        25.0
    } else if (18.0..=35.0).contains(&climate.avg_temp_c) {
        20.0
    } else if (15.0..=40.0).contains(&climate.avg_temp_c) {
        15.0
    } else {
        10.0
    };

    // Rainfall, optimal 800-1500 mm/yr
    score += if (800.0..=1500.0).contains(&climate.rainfall_mm) {
        25.0
    } else if (600.0..=2000.0).contains(&climate.rainfall_mm) {
        20.0
    } else if (400.0..=2500.0).contains(&climate.rainfall_mm) {
        15.0
    } else {
        10.0
    };

    // Humidity, optimal 60-80%
    score += if (60.0..=80.0).contains(&climate.humidity_pct) {
        10.0
    } else if (50.0..=90.0).contains(&climate.humidity_pct) {
        8.0
    } else {
        5.0
    };

    score += match climate.drought_risk {
        DroughtRiskTier::Low => 20.0,
        DroughtRiskTier::Medium => 15.0,
        DroughtRiskTier::High => 8.0,
        DroughtRiskTier::VeryHigh => 3.0,
    };

    score += if climate.growing_season_days >= 240.0 {
        20.0
    } else if climate.growing_season_days >= 180.0 {
        15.0
    } else if climate.growing_season_days >= 120.0 {
        10.0
    } else {
        5.0
    };

    // Sustained wind dries sites out and stresses saplings.
    if let Some(wind) = climate.wind_speed_kmh {
        score -= if wind > 50.0 {
            10.0
        } else if wind > 30.0 {
            5.0
        } else {
            0.0
        };
    }

    score.clamp(0.0, 100.0)
}

/// Vegetation sub-score: NDVI, health, coverage and trend bands. A positive
/// change rate is rewarded, decline is penalized.
fn vegetation_score(reading: &EnvironmentalReading) -> f64 {
    let veg = &reading.vegetation;
    let mut score: f64 = 0.0;

    score += if veg.ndvi >= 0.6 {
        30.0
    } else if veg.ndvi >= 0.4 {
        25.0
    } else if veg.ndvi >= 0.2 {
        15.0
    } else {
        5.0
    };

    score += if veg.health_score >= 80.0 {
        30.0
    } else if veg.health_score >= 60.0 {
        22.0
    } else if veg.health_score >= 40.0 {
        14.0
    } else {
        6.0
    };

    score += if veg.coverage_pct >= 70.0 {
        20.0
    } else if veg.coverage_pct >= 40.0 {
        14.0
    } else if veg.coverage_pct >= 20.0 {
        8.0
    } else {
        3.0
    };

    score += if veg.change_rate_pct > 1.0 {
        20.0
    } else if veg.change_rate_pct >= -1.0 {
        12.0
    } else if veg.change_rate_pct >= -5.0 {
        6.0
    } else {
        0.0
    };

    score.clamp(0.0, 100.0)
}

/// Ordered first-match priority rules: degraded-but-salvageable sites rank
/// highest, already-healthy or hopeless sites rank lowest.
fn priority_tier(ndvi: f64, overall: u32) -> PriorityTier {
    if ndvi < 0.3 && overall > 40 {
        PriorityTier::High
    } else if ndvi < 0.5 && overall > 50 {
        PriorityTier::Medium
    } else if ndvi > 0.7 || overall < 30 {
        PriorityTier::Low
    } else {
        PriorityTier::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use approx::assert_relative_eq;

    fn default_reading() -> EnvironmentalReading {
        normalize(None, None, None)
    }

    #[test]
    fn overall_equals_weighted_fusion_of_components() {
        let reading = default_reading();
        let result = score(&reading);

        let expected = (result.component_scores.vegetation * 0.4
            + result.component_scores.soil * 0.3
            + result.component_scores.climate * 0.3)
            .round() as u32;
        assert_eq!(result.overall_score, expected);
        assert!(result.overall_score <= 100);
    }

    #[test]
    fn fully_defaulted_reading_scores_in_good_band() {
        // Midpoint defaults describe a decent, unremarkable site.
        let result = score(&default_reading());
        assert!(
            (60..=85).contains(&result.overall_score),
            "defaults scored {}",
            result.overall_score
        );
        assert!(matches!(
            result.band,
            ScoreBand::Good | ScoreBand::Excellent
        ));
    }

    #[test]
    fn component_scores_stay_bounded_at_extremes() {
        let mut best = default_reading();
        best.soil.ph = 6.5;
        best.soil.nitrogen = NutrientLevel::High;
        best.soil.phosphorus = NutrientLevel::High;
        best.soil.potassium = NutrientLevel::High;
        best.soil.organic_matter_pct = 5.0;
        best.vegetation.ndvi = 0.8;
        best.vegetation.health_score = 95.0;
        best.vegetation.coverage_pct = 85.0;
        best.vegetation.change_rate_pct = 4.0;
        best.climate.drought_risk = DroughtRiskTier::Low;

        let result = score(&best);
        assert!(result.component_scores.soil <= 100.0);
        assert!(result.component_scores.climate <= 100.0);
        assert!(result.component_scores.vegetation <= 100.0);
        assert!(result.overall_score <= 100);

        let mut worst = default_reading();
        worst.soil.ph = 3.0;
        worst.soil.moisture_pct = 0.0;
        worst.climate.avg_temp_c = 50.0;
        worst.climate.rainfall_mm = 0.0;
        worst.climate.wind_speed_kmh = Some(120.0);
        worst.vegetation.ndvi = -0.5;
        worst.vegetation.change_rate_pct = -40.0;

        let result = score(&worst);
        assert!(result.component_scores.soil >= 0.0);
        assert!(result.component_scores.climate >= 0.0);
        assert!(result.component_scores.vegetation >= 0.0);
    }

    #[test]
    fn soil_score_prefers_optimal_ph_and_moisture() {
        let mut reading = default_reading();
        reading.soil.ph = 6.5;
        reading.soil.moisture_pct = 60.0;
        let optimal = score(&reading).component_scores.soil;

        reading.soil.ph = 4.2;
        reading.soil.moisture_pct = 15.0;
        let poor = score(&reading).component_scores.soil;

        assert!(optimal > poor);
        assert_relative_eq!(optimal - poor, 15.0 + 7.0);
    }

    #[test]
    fn wind_deduction_applies_only_when_present() {
        let mut reading = default_reading();
        reading.climate.wind_speed_kmh = None;
        let calm = score(&reading).component_scores.climate;

        reading.climate.wind_speed_kmh = Some(60.0);
        let windy = score(&reading).component_scores.climate;

        assert_relative_eq!(calm - windy, 10.0);
    }

    #[test]
    fn priority_rules_are_ordered_first_match() {
        // Degraded but salvageable: NDVI < 0.3, overall > 40.
        let mut reading = default_reading();
        reading.vegetation.ndvi = 0.2;
        assert_eq!(score(&reading).priority, PriorityTier::High);

        // Already healthy: NDVI > 0.7.
        reading.vegetation.ndvi = 0.8;
        reading.vegetation.health_score = 90.0;
        assert_eq!(score(&reading).priority, PriorityTier::Low);

        // Moderately degraded with decent score.
        reading.vegetation.ndvi = 0.45;
        reading.vegetation.health_score = 70.0;
        assert_eq!(score(&reading).priority, PriorityTier::Medium);
    }

    #[test]
    fn decline_trend_scores_below_growth_trend() {
        let mut reading = default_reading();
        reading.vegetation.change_rate_pct = 3.0;
        let growing = score(&reading).component_scores.vegetation;

        reading.vegetation.change_rate_pct = -8.0;
        let declining = score(&reading).component_scores.vegetation;

        assert_relative_eq!(growing - declining, 20.0);
    }
}

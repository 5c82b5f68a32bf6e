//! Risk fusion engine: independent hazard scores fused into one risk figure
//! with a dominant cause, a categorical time-to-impact window, mitigation
//! actions and a data-quality confidence.

pub mod actions;
pub mod hazards;

use crate::model::{EnvironmentalReading, ForecastDay};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Fusion weights for the four core hazards. Sum to 1.0.
const DROUGHT_WEIGHT: f64 = 0.35;
const HEAT_STRESS_WEIGHT: f64 = 0.25;
const WATER_SCARCITY_WEIGHT: f64 = 0.25;
const VEGETATION_DECLINE_WEIGHT: f64 = 0.15;

/// Sources with confidence below this are treated as defaulted/mock data
/// when computing assessment confidence.
const DEGRADED_SOURCE: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Drought,
    HeatStress,
    WaterScarcity,
    VegetationDecline,
    Flood,
    Pest,
    Disease,
    Fire,
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardKind::Drought => write!(f, "Drought"),
            HazardKind::HeatStress => write!(f, "Heat Stress"),
            HazardKind::WaterScarcity => write!(f, "Water Scarcity"),
            HazardKind::VegetationDecline => write!(f, "Vegetation Decline"),
            HazardKind::Flood => write!(f, "Flood"),
            HazardKind::Pest => write!(f, "Pest"),
            HazardKind::Disease => write!(f, "Disease"),
            HazardKind::Fire => write!(f, "Fire"),
        }
    }
}

/// Per-hazard severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn from_score(score: f64) -> Severity {
        if score >= 80.0 {
            Severity::Critical
        } else if score >= 60.0 {
            Severity::High
        } else if score >= 40.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Overall risk level from the fused score: >= 70 HIGH, >= 40 MEDIUM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> RiskLevel {
        if score >= 70 {
            RiskLevel::High
        } else if score >= 40 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardScore {
    pub kind: HazardKind,
    pub score: f64,
    pub severity: Severity,
}

impl HazardScore {
    fn new(kind: HazardKind, score: f64) -> HazardScore {
        HazardScore {
            kind,
            score,
            severity: Severity::from_score(score),
        }
    }
}

/// Optional risk inputs beyond the reading itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskOptions {
    /// Daily weather forecast, soonest first. Drought, heat and water
    /// scarcity use forecast aggregates when present; flood requires it.
    #[serde(default)]
    pub forecast: Option<Vec<ForecastDay>>,
    /// Stand age; young trees are more heat-vulnerable.
    #[serde(default = "default_tree_age")]
    pub tree_age_years: f64,
}

fn default_tree_age() -> f64 {
    1.0
}

impl Default for RiskOptions {
    fn default() -> Self {
        RiskOptions {
            forecast: None,
            tree_age_years: 1.0,
        }
    }
}

/// Fused multi-hazard assessment. Stateless, recomputed per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub final_score: u32,
    pub level: RiskLevel,
    pub primary_cause: HazardKind,
    /// Categorical window, e.g. "7-14 days".
    pub time_to_impact: String,
    pub recommended_actions: Vec<String>,
    /// All scored hazards in canonical order: the four core hazards first,
    /// then any extended hazard that produced a signal.
    pub breakdown: Vec<HazardScore>,
    /// 0-100; reduced when inputs were defaulted, floored at 50.
    pub confidence: u32,
}

/// Assess a normalized reading. Never fails: a fully defaulted reading still
/// produces a valid, low-confidence assessment.
pub fn assess(reading: &EnvironmentalReading, opts: &RiskOptions) -> RiskAssessment {
    let forecast = opts.forecast.as_deref();

    let drought = hazards::drought(reading, forecast);
    let heat = hazards::heat_stress(reading, forecast, opts.tree_age_years);
    let water = hazards::water_scarcity(reading, forecast);
    let decline = hazards::vegetation_decline(reading);

    let final_score = (drought * DROUGHT_WEIGHT
        + heat * HEAT_STRESS_WEIGHT
        + water * WATER_SCARCITY_WEIGHT
        + decline * VEGETATION_DECLINE_WEIGHT)
        .round() as u32;
    let level = RiskLevel::from_score(final_score);

    // Highest raw core hazard wins; ties break by listed order.
    let core = [
        HazardScore::new(HazardKind::Drought, drought),
        HazardScore::new(HazardKind::HeatStress, heat),
        HazardScore::new(HazardKind::WaterScarcity, water),
        HazardScore::new(HazardKind::VegetationDecline, decline),
    ];
    let primary_cause = core
        .iter()
        .fold(core[0], |best, h| if h.score > best.score { *h } else { best })
        .kind;

    let mut breakdown = core.to_vec();
    if let Some(score) = hazards::flood(reading, forecast) {
        breakdown.push(HazardScore::new(HazardKind::Flood, score));
    }
    if let Some(score) = hazards::pest(reading) {
        breakdown.push(HazardScore::new(HazardKind::Pest, score));
    }
    if let Some(score) = hazards::disease(reading) {
        breakdown.push(HazardScore::new(HazardKind::Disease, score));
    }
    if let Some(score) = hazards::fire(reading) {
        breakdown.push(HazardScore::new(HazardKind::Fire, score));
    }

    let confidence = assessment_confidence(reading, forecast.is_some());
    debug!(final_score, %level, cause = %primary_cause, confidence, "risk fused");

    RiskAssessment {
        final_score,
        level,
        primary_cause,
        time_to_impact: time_to_impact(final_score).to_string(),
        recommended_actions: actions::recommended_actions(level, primary_cause),
        breakdown,
        confidence,
    }
}

/// Categorical impact window keyed by the fused score band.
fn time_to_impact(final_score: u32) -> &'static str {
    if final_score >= 70 {
        "7-14 days"
    } else if final_score >= 40 {
        "14-21 days"
    } else {
        "21-30 days"
    }
}

/// Start at 100 and subtract fixed penalties for defaulted inputs:
/// no forecast -15, degraded weather -20, degraded soil -15, degraded
/// vegetation -10. Floor 50.
fn assessment_confidence(reading: &EnvironmentalReading, has_forecast: bool) -> u32 {
    let mut confidence: i32 = 100;
    if !has_forecast {
        confidence -= 15;
    }
    if reading.source_confidence.climate < DEGRADED_SOURCE {
        confidence -= 20;
    }
    if reading.source_confidence.soil < DEGRADED_SOURCE {
        confidence -= 15;
    }
    if reading.source_confidence.vegetation < DEGRADED_SOURCE {
        confidence -= 10;
    }
    confidence.max(50) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize, RawClimate, RawSoil, RawVegetation};

    fn live_reading() -> EnvironmentalReading {
        let soil = RawSoil {
            ph: Some(6.5),
            nitrogen: Some(Default::default()),
            phosphorus: Some(Default::default()),
            potassium: Some(Default::default()),
            moisture_pct: Some(60.0),
            organic_matter_pct: Some(2.5),
            texture: Some("loam".into()),
            clay_pct: Some(30.0),
            sand_pct: Some(40.0),
            confidence: Some(1.0),
        };
        let climate = RawClimate {
            avg_temp_c: Some(25.0),
            min_temp_c: Some(15.0),
            max_temp_c: Some(32.0),
            rainfall_mm: Some(1000.0),
            humidity_pct: Some(65.0),
            drought_risk: Some(Default::default()),
            growing_season_days: Some(240.0),
            wind_speed_kmh: None,
            confidence: Some(1.0),
        };
        let vegetation = RawVegetation {
            ndvi: Some(0.5),
            evi: Some(0.35),
            health_score: Some(70.0),
            coverage_pct: Some(50.0),
            change_rate_pct: Some(0.0),
            confidence: Some(1.0),
        };
        normalize(Some(&soil), Some(&climate), Some(&vegetation))
    }

    #[test]
    fn final_score_is_weighted_fusion_of_core_hazards() {
        let mut reading = live_reading();
        reading.soil.moisture_pct = 35.0;
        reading.climate.avg_temp_c = 33.0;
        reading.climate.humidity_pct = 45.0;

        let result = assess(&reading, &RiskOptions::default());
        let by_kind = |k: HazardKind| {
            result
                .breakdown
                .iter()
                .find(|h| h.kind == k)
                .unwrap()
                .score
        };
        let expected = (by_kind(HazardKind::Drought) * 0.35
            + by_kind(HazardKind::HeatStress) * 0.25
            + by_kind(HazardKind::WaterScarcity) * 0.25
            + by_kind(HazardKind::VegetationDecline) * 0.15)
            .round() as u32;
        assert_eq!(result.final_score, expected);
    }

    #[test]
    fn severe_drought_reading_classifies_high_with_drought_cause() {
        let mut reading = live_reading();
        reading.soil.moisture_pct = 25.0;
        reading.soil.sand_pct = 75.0;
        reading.climate.rainfall_mm = 150.0;
        reading.climate.avg_temp_c = 38.0;
        reading.climate.max_temp_c = 41.0;
        reading.climate.humidity_pct = 25.0;

        let result = assess(&reading, &RiskOptions::default());
        let drought = result
            .breakdown
            .iter()
            .find(|h| h.kind == HazardKind::Drought)
            .unwrap();
        assert!(drought.score >= 70.0);
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(result.primary_cause, HazardKind::Drought);
        assert_eq!(result.time_to_impact, "7-14 days");
        assert!(!result.recommended_actions.is_empty());
    }

    #[test]
    fn level_is_monotonic_in_final_score() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
    }

    #[test]
    fn severity_bands_and_labels() {
        assert_eq!(Severity::from_score(85.0), Severity::Critical);
        assert_eq!(Severity::from_score(60.0), Severity::High);
        assert_eq!(Severity::from_score(40.0), Severity::Medium);
        assert_eq!(Severity::from_score(10.0), Severity::Low);
        assert_eq!(Severity::Critical.to_string(), "critical");
        assert_eq!(Severity::Low.to_string(), "low");
    }

    #[test]
    fn primary_cause_ties_break_by_listed_order() {
        // A benign reading drives every core hazard to 0; drought is the
        // first-listed hazard and must win the tie.
        let mut reading = live_reading();
        reading.climate.rainfall_mm = 2000.0;
        reading.climate.max_temp_c = 28.0;
        let opts = RiskOptions {
            forecast: None,
            tree_age_years: 5.0,
        };
        let result = assess(&reading, &opts);
        for h in &result.breakdown[..4] {
            assert_eq!(h.score, 0.0, "{} should be quiescent", h.kind);
        }
        assert_eq!(result.primary_cause, HazardKind::Drought);
    }

    #[test]
    fn confidence_penalties_accumulate_with_floor() {
        // All live, no forecast: only the -15 forecast penalty.
        let live = assess(&live_reading(), &RiskOptions::default());
        assert_eq!(live.confidence, 85);

        // Everything defaulted: 100 - 15 - 20 - 15 - 10 = 40, floored at 50.
        let defaulted = assess(&normalize(None, None, None), &RiskOptions::default());
        assert_eq!(defaulted.confidence, 50);
    }

    #[test]
    fn forecast_lifts_confidence_and_enables_flood() {
        let mut reading = live_reading();
        reading.soil.clay_pct = 50.0;
        let opts = RiskOptions {
            forecast: Some(vec![
                crate::model::ForecastDay {
                    temp_c: 26.0,
                    precipitation_mm: 18.0,
                    humidity_pct: 85.0,
                };
                7
            ]),
            tree_age_years: 1.0,
        };
        let result = assess(&reading, &opts);
        assert_eq!(result.confidence, 100);
        let flood = result
            .breakdown
            .iter()
            .find(|h| h.kind == HazardKind::Flood)
            .expect("flood hazard should be scored with forecast present");
        assert!(flood.score >= 45.0);
    }

    #[test]
    fn defaulted_reading_still_produces_valid_assessment() {
        let result = assess(&normalize(None, None, None), &RiskOptions::default());
        assert!(result.final_score <= 100);
        assert_eq!(result.recommended_actions.len(), 4);
        assert!(result.confidence >= 50);
    }
}

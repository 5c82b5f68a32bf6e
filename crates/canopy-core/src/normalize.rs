//! Reading normalizer: converts heterogeneous upstream payloads (possibly
//! missing or partial) into a canonical, range-valid [`EnvironmentalReading`].
//!
//! Missing data never raises an error. Every absent field gets a documented
//! midpoint default and the affected source's confidence is reduced, so
//! downstream scorers can assume a fully populated reading and consumers can
//! still tell live data from defaulted data.

use crate::model::{
    ClimateReading, DroughtRiskTier, EnvironmentalReading, NutrientLevel, SoilReading,
    SourceConfidence, VegetationReading,
};
use serde::{Deserialize, Serialize};

/// Penalty applied when an entire sub-reading is absent.
const MISSING_SOURCE_PENALTY: f64 = 0.2;
/// Penalty applied when a present sub-reading has defaulted fields.
const PARTIAL_SOURCE_PENALTY: f64 = 0.15;
/// Confidence never drops below this through defaulting alone.
const CONFIDENCE_FLOOR: f64 = 0.5;

/// Raw soil payload as delivered by an upstream provider. Every field is
/// optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSoil {
    pub ph: Option<f64>,
    pub nitrogen: Option<NutrientLevel>,
    pub phosphorus: Option<NutrientLevel>,
    pub potassium: Option<NutrientLevel>,
    pub moisture_pct: Option<f64>,
    pub organic_matter_pct: Option<f64>,
    pub texture: Option<String>,
    pub clay_pct: Option<f64>,
    pub sand_pct: Option<f64>,
    /// Provider-reported confidence in [0, 1].
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawClimate {
    pub avg_temp_c: Option<f64>,
    pub min_temp_c: Option<f64>,
    pub max_temp_c: Option<f64>,
    pub rainfall_mm: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub drought_risk: Option<DroughtRiskTier>,
    pub growing_season_days: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVegetation {
    pub ndvi: Option<f64>,
    pub evi: Option<f64>,
    pub health_score: Option<f64>,
    pub coverage_pct: Option<f64>,
    pub change_rate_pct: Option<f64>,
    pub confidence: Option<f64>,
}

/// Convenience wrapper for a full raw payload, used by callers that receive
/// all three sources in one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReading {
    #[serde(default)]
    pub soil: Option<RawSoil>,
    #[serde(default)]
    pub climate: Option<RawClimate>,
    #[serde(default)]
    pub vegetation: Option<RawVegetation>,
}

/// Build a canonical reading from raw upstream payloads.
///
/// Any absent sub-reading is fully defaulted with a 0.2 confidence penalty;
/// a present sub-reading with missing fields takes a 0.15 penalty. All
/// numeric fields are clamped to their valid ranges. Confidence never drops
/// below 0.5 through defaulting alone.
pub fn normalize(
    raw_soil: Option<&RawSoil>,
    raw_climate: Option<&RawClimate>,
    raw_vegetation: Option<&RawVegetation>,
) -> EnvironmentalReading {
    let (soil, soil_conf) = normalize_soil(raw_soil);
    let (climate, climate_conf) = normalize_climate(raw_climate);
    let (vegetation, veg_conf) = normalize_vegetation(raw_vegetation);

    EnvironmentalReading {
        soil,
        climate,
        vegetation,
        source_confidence: SourceConfidence {
            soil: soil_conf,
            climate: climate_conf,
            vegetation: veg_conf,
        },
    }
}

/// Normalize a combined raw payload.
pub fn normalize_raw(raw: &RawReading) -> EnvironmentalReading {
    normalize(
        raw.soil.as_ref(),
        raw.climate.as_ref(),
        raw.vegetation.as_ref(),
    )
}

fn source_confidence(reported: Option<f64>, source_present: bool, any_defaulted: bool) -> f64 {
    let base = reported.unwrap_or(1.0).clamp(0.0, 1.0);
    let penalty = if !source_present {
        MISSING_SOURCE_PENALTY
    } else if any_defaulted {
        PARTIAL_SOURCE_PENALTY
    } else {
        return base;
    };
    (base - penalty).max(CONFIDENCE_FLOOR)
}

fn normalize_soil(raw: Option<&RawSoil>) -> (SoilReading, f64) {
    let present = raw.is_some();
    let raw = raw.cloned().unwrap_or_default();
    let defaulted = raw.ph.is_none()
        || raw.nitrogen.is_none()
        || raw.phosphorus.is_none()
        || raw.potassium.is_none()
        || raw.moisture_pct.is_none()
        || raw.organic_matter_pct.is_none()
        || raw.texture.is_none()
        || raw.clay_pct.is_none()
        || raw.sand_pct.is_none();

    let soil = SoilReading {
        ph: raw.ph.unwrap_or(6.5).clamp(3.0, 10.0),
        nitrogen: raw.nitrogen.unwrap_or_default(),
        phosphorus: raw.phosphorus.unwrap_or_default(),
        potassium: raw.potassium.unwrap_or_default(),
        moisture_pct: raw.moisture_pct.unwrap_or(60.0).clamp(0.0, 100.0),
        organic_matter_pct: raw.organic_matter_pct.unwrap_or(2.5).clamp(0.0, 100.0),
        texture: raw.texture.unwrap_or_else(|| "loam".to_string()),
        clay_pct: raw.clay_pct.unwrap_or(30.0).clamp(0.0, 100.0),
        sand_pct: raw.sand_pct.unwrap_or(40.0).clamp(0.0, 100.0),
    };
    (soil, source_confidence(raw.confidence, present, defaulted))
}

fn normalize_climate(raw: Option<&RawClimate>) -> (ClimateReading, f64) {
    let present = raw.is_some();
    let raw = raw.cloned().unwrap_or_default();
    // Wind is genuinely optional upstream, so it never counts as defaulted.
    let defaulted = raw.avg_temp_c.is_none()
        || raw.min_temp_c.is_none()
        || raw.max_temp_c.is_none()
        || raw.rainfall_mm.is_none()
        || raw.humidity_pct.is_none()
        || raw.drought_risk.is_none()
        || raw.growing_season_days.is_none();

    let climate = ClimateReading {
        avg_temp_c: raw.avg_temp_c.unwrap_or(25.0).clamp(-50.0, 60.0),
        min_temp_c: raw.min_temp_c.unwrap_or(15.0).clamp(-60.0, 50.0),
        max_temp_c: raw.max_temp_c.unwrap_or(32.0).clamp(-40.0, 70.0),
        rainfall_mm: raw.rainfall_mm.unwrap_or(1000.0).clamp(0.0, 12000.0),
        humidity_pct: raw.humidity_pct.unwrap_or(65.0).clamp(0.0, 100.0),
        drought_risk: raw.drought_risk.unwrap_or_default(),
        growing_season_days: raw.growing_season_days.unwrap_or(240.0).clamp(0.0, 366.0),
        wind_speed_kmh: raw.wind_speed_kmh.map(|w| w.clamp(0.0, 200.0)),
    };
    (climate, source_confidence(raw.confidence, present, defaulted))
}

fn normalize_vegetation(raw: Option<&RawVegetation>) -> (VegetationReading, f64) {
    let present = raw.is_some();
    let raw = raw.cloned().unwrap_or_default();
    let defaulted = raw.ndvi.is_none()
        || raw.evi.is_none()
        || raw.health_score.is_none()
        || raw.coverage_pct.is_none()
        || raw.change_rate_pct.is_none();

    let vegetation = VegetationReading {
        ndvi: raw.ndvi.unwrap_or(0.5).clamp(-1.0, 1.0),
        evi: raw.evi.unwrap_or(0.35).clamp(-1.0, 1.0),
        health_score: raw.health_score.unwrap_or(70.0).clamp(0.0, 100.0),
        coverage_pct: raw.coverage_pct.unwrap_or(50.0).clamp(0.0, 100.0),
        change_rate_pct: raw.change_rate_pct.unwrap_or(0.0).clamp(-100.0, 100.0),
    };
    (vegetation, source_confidence(raw.confidence, present, defaulted))
}

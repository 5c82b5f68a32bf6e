use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative nutrient availability as reported by soil surveys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutrientLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl NutrientLevel {
    pub fn from_str_loose(s: &str) -> Option<NutrientLevel> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(NutrientLevel::Low),
            "medium" | "moderate" => Some(NutrientLevel::Medium),
            "high" => Some(NutrientLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for NutrientLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NutrientLevel::Low => write!(f, "low"),
            NutrientLevel::Medium => write!(f, "medium"),
            NutrientLevel::High => write!(f, "high"),
        }
    }
}

/// Regional drought exposure tier for the site's climate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroughtRiskTier {
    Low,
    #[default]
    Medium,
    High,
    VeryHigh,
}

impl DroughtRiskTier {
    /// Ordinal rank for comparison against species drought tolerance.
    pub fn rank(self) -> u8 {
        match self {
            DroughtRiskTier::Low => 1,
            DroughtRiskTier::Medium => 2,
            DroughtRiskTier::High => 3,
            DroughtRiskTier::VeryHigh => 4,
        }
    }
}

impl fmt::Display for DroughtRiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DroughtRiskTier::Low => write!(f, "low"),
            DroughtRiskTier::Medium => write!(f, "medium"),
            DroughtRiskTier::High => write!(f, "high"),
            DroughtRiskTier::VeryHigh => write!(f, "very_high"),
        }
    }
}

/// Annual rainfall bucket used to pre-filter species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RainfallCategory {
    Low,
    Medium,
    High,
}

impl RainfallCategory {
    /// Bucket annual rainfall: < 600 mm low, < 1200 mm medium, else high.
    pub fn from_annual_mm(rainfall_mm: f64) -> RainfallCategory {
        if rainfall_mm < 600.0 {
            RainfallCategory::Low
        } else if rainfall_mm < 1200.0 {
            RainfallCategory::Medium
        } else {
            RainfallCategory::High
        }
    }
}

impl fmt::Display for RainfallCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RainfallCategory::Low => write!(f, "low"),
            RainfallCategory::Medium => write!(f, "medium"),
            RainfallCategory::High => write!(f, "high"),
        }
    }
}

/// Soil chemistry and structure for one site.
///
/// All numeric fields are range-valid once a reading leaves the normalizer:
/// pH in [3, 10], percentages in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    pub ph: f64,
    pub nitrogen: NutrientLevel,
    pub phosphorus: NutrientLevel,
    pub potassium: NutrientLevel,
    pub moisture_pct: f64,
    pub organic_matter_pct: f64,
    /// Free-form texture class (e.g. "sandy loam"). Matched by substring
    /// against species soil preferences.
    pub texture: String,
    pub clay_pct: f64,
    pub sand_pct: f64,
}

/// Climate normals for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateReading {
    pub avg_temp_c: f64,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    /// Annual rainfall in mm.
    pub rainfall_mm: f64,
    pub humidity_pct: f64,
    pub drought_risk: DroughtRiskTier,
    pub growing_season_days: f64,
    /// Mean wind speed in km/h, when the upstream source reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed_kmh: Option<f64>,
}

/// Satellite-derived vegetation condition for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetationReading {
    /// Normalized Difference Vegetation Index, [-1, 1].
    pub ndvi: f64,
    /// Enhanced Vegetation Index, [-1, 1].
    pub evi: f64,
    /// Composite canopy health, [0, 100].
    pub health_score: f64,
    pub coverage_pct: f64,
    /// Recent NDVI change rate in percent; negative means decline.
    pub change_rate_pct: f64,
}

/// Per-source data quality, each in [0, 1]. 1.0 means live upstream data,
/// lower values mean defaults or mock data were substituted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceConfidence {
    pub soil: f64,
    pub climate: f64,
    pub vegetation: f64,
}

impl SourceConfidence {
    pub fn mean(&self) -> f64 {
        (self.soil + self.climate + self.vegetation) / 3.0
    }
}

impl Default for SourceConfidence {
    fn default() -> Self {
        SourceConfidence {
            soil: 1.0,
            climate: 1.0,
            vegetation: 1.0,
        }
    }
}

/// Canonical, range-valid environmental snapshot of a site.
///
/// Produced by the normalizer, immutable afterwards. Scenario simulation
/// always works on a clone, never in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    pub soil: SoilReading,
    pub climate: ClimateReading,
    pub vegetation: VegetationReading,
    pub source_confidence: SourceConfidence,
}

/// One day of weather forecast, consumed by the risk engine when available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub temp_c: f64,
    pub precipitation_mm: f64,
    pub humidity_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rainfall_category_breakpoints() {
        assert_eq!(RainfallCategory::from_annual_mm(0.0), RainfallCategory::Low);
        assert_eq!(
            RainfallCategory::from_annual_mm(599.9),
            RainfallCategory::Low
        );
        assert_eq!(
            RainfallCategory::from_annual_mm(600.0),
            RainfallCategory::Medium
        );
        assert_eq!(
            RainfallCategory::from_annual_mm(1200.0),
            RainfallCategory::High
        );
    }

    #[test]
    fn drought_tier_ordering() {
        assert!(DroughtRiskTier::VeryHigh.rank() > DroughtRiskTier::High.rank());
        assert!(DroughtRiskTier::High.rank() > DroughtRiskTier::Medium.rank());
        assert!(DroughtRiskTier::Medium.rank() > DroughtRiskTier::Low.rank());
    }

    #[test]
    fn nutrient_level_loose_parsing() {
        assert_eq!(
            NutrientLevel::from_str_loose(" High "),
            Some(NutrientLevel::High)
        );
        assert_eq!(
            NutrientLevel::from_str_loose("moderate"),
            Some(NutrientLevel::Medium)
        );
        assert_eq!(NutrientLevel::from_str_loose("unknown"), None);
    }

    #[test]
    fn source_confidence_mean() {
        let c = SourceConfidence {
            soil: 1.0,
            climate: 0.8,
            vegetation: 0.6,
        };
        assert!((c.mean() - 0.8).abs() < 1e-9);
    }
}

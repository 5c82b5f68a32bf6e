//! Species catalog: static reference profiles evaluated by the matcher.
//!
//! Catalogs load from JSON (builtin preset or caller-supplied file) and are
//! validated at the boundary; the matcher itself assumes a well-formed
//! catalog and treats an empty one as "no recommendations", not an error.

use crate::error::CanopyError;
use crate::model::RainfallCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const BUILTIN_SPECIES_JSON: &str = include_str!("../../../../data/species.json");

/// Species drought tolerance, comparable against the site's drought tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroughtTolerance {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl DroughtTolerance {
    pub fn rank(self) -> u8 {
        match self {
            DroughtTolerance::Low => 1,
            DroughtTolerance::Medium => 2,
            DroughtTolerance::High => 3,
            DroughtTolerance::VeryHigh => 4,
        }
    }
}

impl fmt::Display for DroughtTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DroughtTolerance::Low => write!(f, "low"),
            DroughtTolerance::Medium => write!(f, "medium"),
            DroughtTolerance::High => write!(f, "high"),
            DroughtTolerance::VeryHigh => write!(f, "very high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthRate {
    Slow,
    Medium,
    Fast,
    VeryFast,
}

impl GrowthRate {
    /// Match-score bonus: faster establishment ranks higher.
    pub fn bonus(self) -> f64 {
        match self {
            GrowthRate::VeryFast => 0.10,
            GrowthRate::Fast => 0.08,
            GrowthRate::Medium => 0.05,
            GrowthRate::Slow => 0.02,
        }
    }
}

impl fmt::Display for GrowthRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthRate::Slow => write!(f, "slow"),
            GrowthRate::Medium => write!(f, "medium"),
            GrowthRate::Fast => write!(f, "fast"),
            GrowthRate::VeryFast => write!(f, "very fast"),
        }
    }
}

/// One species' reference profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    pub name: String,
    pub scientific_name: String,
    /// [min, max] tolerated soil pH.
    pub ph_range: [f64; 2],
    pub rainfall_category: RainfallCategory,
    /// [min, max] annual rainfall in mm.
    pub rainfall_range_mm: [f64; 2],
    /// [min, max] tolerated mean temperature in C.
    pub temperature_range_c: [f64; 2],
    pub drought_tolerance: DroughtTolerance,
    pub growth_rate: GrowthRate,
    pub maturity_years: f64,
    pub max_height_m: f64,
    /// Preferred soil texture, matched by substring against the reading.
    pub soil_preference: String,
    /// Tons of CO2 per hectare per year.
    pub carbon_sequestration_rate: f64,
    /// Relative biodiversity contribution, 0-100.
    pub biodiversity_value: f64,
    #[serde(default)]
    pub uses: Vec<String>,
}

/// An ordered species catalog. Order matters: the matcher's sort is stable,
/// so catalog order breaks match-score ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesCatalog {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub species: Vec<SpeciesProfile>,
}

/// Load the builtin catalog shipped with the crate.
pub fn load_builtin() -> Result<SpeciesCatalog, CanopyError> {
    let catalog: SpeciesCatalog = serde_json::from_str(BUILTIN_SPECIES_JSON)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<SpeciesCatalog, CanopyError> {
    let content = std::fs::read_to_string(path).map_err(|e| CanopyError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let catalog: SpeciesCatalog =
        serde_json::from_str(&content).map_err(|e| CanopyError::CatalogLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Parse a catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<SpeciesCatalog, CanopyError> {
    let catalog: SpeciesCatalog = serde_json::from_str(json).map_err(CanopyError::Json)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Validate that a catalog is well-formed.
pub fn validate_catalog(catalog: &SpeciesCatalog) -> Result<(), CanopyError> {
    if catalog.species.is_empty() {
        return Err(CanopyError::CatalogInvalid(
            "species list must not be empty".into(),
        ));
    }

    for sp in &catalog.species {
        if sp.name.is_empty() {
            return Err(CanopyError::CatalogInvalid(
                "species name must not be empty".into(),
            ));
        }
        if sp.ph_range[0] > sp.ph_range[1] {
            return Err(CanopyError::CatalogInvalid(format!(
                "species '{}' has inverted pH range [{}, {}]",
                sp.name, sp.ph_range[0], sp.ph_range[1]
            )));
        }
        if sp.rainfall_range_mm[0] > sp.rainfall_range_mm[1] {
            return Err(CanopyError::CatalogInvalid(format!(
                "species '{}' has inverted rainfall range",
                sp.name
            )));
        }
        if sp.temperature_range_c[0] > sp.temperature_range_c[1] {
            return Err(CanopyError::CatalogInvalid(format!(
                "species '{}' has inverted temperature range",
                sp.name
            )));
        }
        if sp.maturity_years <= 0.0 {
            return Err(CanopyError::CatalogInvalid(format!(
                "species '{}' has non-positive maturity",
                sp.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads_and_validates() {
        let catalog = load_builtin().unwrap();
        assert!(!catalog.species.is_empty());
        assert!(catalog.species.iter().any(|s| s.name == "Umbrella Thorn"));
    }

    #[test]
    fn empty_species_list_rejected() {
        let json = r#"{ "name": "Empty", "version": "1.0", "species": [] }"#;
        assert!(matches!(
            parse_catalog_str(json),
            Err(CanopyError::CatalogInvalid(_))
        ));
    }

    #[test]
    fn inverted_ph_range_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "species": [{
                "name": "Broken",
                "scientific_name": "Fractus arbor",
                "ph_range": [7.5, 6.0],
                "rainfall_category": "medium",
                "rainfall_range_mm": [800, 1500],
                "temperature_range_c": [18, 32],
                "drought_tolerance": "medium",
                "growth_rate": "fast",
                "maturity_years": 8,
                "max_height_m": 20,
                "soil_preference": "loam",
                "carbon_sequestration_rate": 8,
                "biodiversity_value": 60
            }]
        }"#;
        assert!(matches!(
            parse_catalog_str(json),
            Err(CanopyError::CatalogInvalid(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_catalog(Path::new("/nonexistent/species.json")).unwrap_err();
        assert!(matches!(err, CanopyError::CatalogLoad { .. }));
    }
}

pub mod assess;
pub mod simulate;
pub mod species;

use canopy_core::error::CanopyError;
use canopy_core::model::ForecastDay;
use canopy_core::normalize::{self, RawReading};
use canopy_core::species::catalog::{self, SpeciesCatalog};
use canopy_core::EnvironmentalReading;
use std::path::{Path, PathBuf};

/// Load and normalize a raw reading file.
pub fn load_reading(path: &Path) -> Result<EnvironmentalReading, CanopyError> {
    let bytes = std::fs::read(path)?;
    let raw: RawReading = serde_json::from_slice(&bytes)
        .map_err(|e| CanopyError::ReadingParse(format!("{}: {e}", path.display())))?;
    Ok(normalize::normalize_raw(&raw))
}

/// Load a daily forecast file when one is given.
pub fn load_forecast(path: Option<PathBuf>) -> Result<Option<Vec<ForecastDay>>, CanopyError> {
    match path {
        Some(p) => {
            let bytes = std::fs::read(&p)?;
            let days: Vec<ForecastDay> = serde_json::from_slice(&bytes)
                .map_err(|e| CanopyError::ReadingParse(format!("{}: {e}", p.display())))?;
            Ok(Some(days))
        }
        None => Ok(None),
    }
}

/// Load the given catalog file, or the builtin catalog when none is given.
pub fn load_catalog(path: Option<PathBuf>) -> Result<SpeciesCatalog, CanopyError> {
    match path {
        Some(p) => catalog::load_catalog(&p),
        None => catalog::load_builtin(),
    }
}

use std::path::PathBuf;

/// Boundary errors only: the decision engine itself degrades to
/// lower-confidence results instead of failing (missing data is defaulted,
/// out-of-range values are clamped). Errors arise when loading inputs,
/// before data reaches the engine.
#[derive(Debug, thiserror::Error)]
pub enum CanopyError {
    #[error("failed to load species catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid species catalog: {0}")]
    CatalogInvalid(String),

    #[error("failed to parse reading: {0}")]
    ReadingParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

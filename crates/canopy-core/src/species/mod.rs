pub mod catalog;
pub mod matcher;

pub use catalog::{SpeciesCatalog, SpeciesProfile};
pub use matcher::{recommend, SpeciesRecommendation};

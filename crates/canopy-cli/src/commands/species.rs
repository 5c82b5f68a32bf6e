use canopy_core::error::CanopyError;
use canopy_core::species::catalog;
use std::path::{Path, PathBuf};

pub fn list(catalog_file: Option<PathBuf>) -> Result<(), CanopyError> {
    let catalog = super::load_catalog(catalog_file)?;

    println!("{} (v{})", catalog.name, catalog.version);
    if let Some(ref desc) = catalog.description {
        println!("{desc}");
    }
    println!();

    let max_name = catalog
        .species
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(10);

    for sp in &catalog.species {
        println!(
            "  {:<width$}  {:<32}  rainfall: {:<6}  drought tolerance: {}",
            sp.name,
            sp.scientific_name,
            sp.rainfall_category.to_string(),
            sp.drought_tolerance,
            width = max_name
        );
    }
    Ok(())
}

pub fn show(name: &str, catalog_file: Option<PathBuf>) -> Result<(), CanopyError> {
    let catalog = super::load_catalog(catalog_file)?;
    let sp = catalog
        .species
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            CanopyError::CatalogInvalid(format!("species '{name}' not found in catalog"))
        })?;

    println!("{} ({})\n", sp.name, sp.scientific_name);
    println!("  pH range:            {:.1} - {:.1}", sp.ph_range[0], sp.ph_range[1]);
    println!(
        "  Rainfall:            {} ({:.0} - {:.0} mm/yr)",
        sp.rainfall_category, sp.rainfall_range_mm[0], sp.rainfall_range_mm[1]
    );
    println!(
        "  Temperature:         {:.0} - {:.0} C",
        sp.temperature_range_c[0], sp.temperature_range_c[1]
    );
    println!("  Drought tolerance:   {}", sp.drought_tolerance);
    println!("  Growth rate:         {}", sp.growth_rate);
    println!("  Maturity:            {} years", sp.maturity_years);
    println!("  Max height:          {} m", sp.max_height_m);
    println!("  Soil preference:     {}", sp.soil_preference);
    println!(
        "  Carbon sequestration: {} t/ha/yr",
        sp.carbon_sequestration_rate
    );
    println!("  Biodiversity value:  {}", sp.biodiversity_value);
    if !sp.uses.is_empty() {
        println!("  Uses:                {}", sp.uses.join(", "));
    }
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), CanopyError> {
    let catalog = catalog::load_catalog(file)?;

    println!("Catalog '{}' (v{}) is valid.", catalog.name, catalog.version);
    println!("  Species: {}", catalog.species.len());

    // Warn about odd but not invalid profiles.
    let mut warnings = Vec::new();
    for sp in &catalog.species {
        if sp.rainfall_range_mm[1] > 12000.0 {
            warnings.push(format!(
                "species '{}' rainfall range exceeds any plausible annual total",
                sp.name
            ));
        }
        if sp.biodiversity_value > 100.0 {
            warnings.push(format!(
                "species '{}' biodiversity value above 100",
                sp.name
            ));
        }
    }
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {w}");
        }
    }
    Ok(())
}

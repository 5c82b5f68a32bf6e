use canopy_core::error::CanopyError;
use canopy_core::SiteAssessment;

pub fn print(report: &SiteAssessment) -> Result<(), CanopyError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

pub fn print_comparison(
    baseline: &SiteAssessment,
    simulated: &SiteAssessment,
) -> Result<(), CanopyError> {
    let json = serde_json::to_string_pretty(&serde_json::json!({
        "baseline": baseline,
        "simulated": simulated,
    }))?;
    println!("{json}");
    Ok(())
}

use canopy_core::scenario::ScenarioSpec;
use canopy_core::SiteAssessment;

pub fn print(report: &SiteAssessment, verbose: bool) {
    println!("=== Site suitability ===\n");
    println!(
        "  Overall: {} / 100 ({} priority, {})",
        report.suitability.overall_score, report.suitability.priority, report.suitability.band
    );
    println!("  {}", report.suitability.band.description());
    println!(
        "\n  Soil: {:.0}  Climate: {:.0}  Vegetation: {:.0}\n",
        report.suitability.component_scores.soil,
        report.suitability.component_scores.climate,
        report.suitability.component_scores.vegetation
    );

    println!("=== Species recommendations ===\n");
    if report.species.is_empty() {
        println!("  No species in the catalog are viable under these conditions.\n");
    } else {
        let max_name = report
            .species
            .iter()
            .map(|r| r.profile.name.len())
            .max()
            .unwrap_or(10);
        for rec in &report.species {
            println!(
                "  {:<width$}  survival {:>3.0}%  match {:.2}",
                rec.profile.name,
                rec.survival_probability * 100.0,
                rec.match_score,
                width = max_name
            );
            println!("  {:<width$}  {}", "", rec.reason, width = max_name);
            if verbose {
                for p in &rec.pros {
                    println!("  {:<width$}  + {p}", "", width = max_name);
                }
                for c in &rec.cons {
                    println!("  {:<width$}  - {c}", "", width = max_name);
                }
            }
            println!();
        }
    }

    println!("=== Risk assessment ===\n");
    println!(
        "  Overall: {} / 100 ({}), primary cause: {}",
        report.risk.final_score, report.risk.level, report.risk.primary_cause
    );
    println!("  Time to impact: {}", report.risk.time_to_impact);
    println!("  Confidence: {}%\n", report.risk.confidence);

    if verbose {
        println!("  Hazard breakdown:");
        for h in &report.risk.breakdown {
            println!("    {:<20} {:>5.0}  ({})", h.kind.to_string(), h.score, h.severity);
        }
        println!();
    }

    println!("  Recommended actions:");
    for action in &report.risk.recommended_actions {
        println!("    - {action}");
    }
    println!();

    println!(
        "Assessment confidence: {:.0}%  (generated {})",
        report.aggregate_confidence * 100.0,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
}

pub fn print_comparison(baseline: &SiteAssessment, simulated: &SiteAssessment, spec: &ScenarioSpec) {
    println!(
        "=== Scenario: {} ({} intensity, {} days) ===\n",
        spec.kind, spec.intensity, spec.duration_days
    );

    println!(
        "  Suitability: {} -> {}  ({} -> {})",
        baseline.suitability.overall_score,
        simulated.suitability.overall_score,
        baseline.suitability.band,
        simulated.suitability.band
    );
    println!(
        "  Risk:        {} -> {}  ({} -> {}, primary cause {} -> {})",
        baseline.risk.final_score,
        simulated.risk.final_score,
        baseline.risk.level,
        simulated.risk.level,
        baseline.risk.primary_cause,
        simulated.risk.primary_cause
    );

    let dropped: Vec<&str> = baseline
        .species
        .iter()
        .filter(|b| {
            !simulated
                .species
                .iter()
                .any(|s| s.profile.name == b.profile.name)
        })
        .map(|b| b.profile.name.as_str())
        .collect();
    if !dropped.is_empty() {
        println!("  Species no longer viable: {}", dropped.join(", "));
    }
    println!();

    println!("Under scenario conditions:\n");
    print(simulated, false);
}

//! Static mitigation-action lookup, keyed by risk level and primary cause.
//!
//! Only the four fused hazards have dedicated entries; any other cause falls
//! back to the drought entry for the same level.

use crate::risk::{HazardKind, RiskLevel};

pub fn recommended_actions(level: RiskLevel, cause: HazardKind) -> Vec<String> {
    lookup(level, cause).iter().map(|s| s.to_string()).collect()
}

fn lookup(level: RiskLevel, cause: HazardKind) -> &'static [&'static str] {
    use HazardKind::*;
    match level {
        RiskLevel::High => match cause {
            HeatStress => &[
                "Increase irrigation frequency to twice daily",
                "Install shade cloth for vulnerable saplings",
                "Apply reflective mulch to reduce soil temperature",
                "Monitor for wilting and leaf scorch",
            ],
            WaterScarcity => &[
                "Activate water conservation protocol",
                "Reduce planting density in new areas",
                "Install drip irrigation if available",
                "Harvest and store rainwater",
            ],
            VegetationDecline => &[
                "Conduct immediate field inspection",
                "Test soil for nutrient deficiencies",
                "Check for pest or disease signs",
                "Consider supplemental fertilization",
            ],
            _ => &[
                "Implement emergency irrigation within 48 hours",
                "Apply 5-10cm mulch layer to retain moisture",
                "Prioritize water delivery to young saplings",
                "Consider temporary shade structures",
            ],
        },
        RiskLevel::Medium => match cause {
            HeatStress => &[
                "Adjust irrigation timing to early morning/evening",
                "Apply organic mulch around saplings",
                "Monitor temperature stress indicators",
                "Ensure adequate soil moisture",
            ],
            WaterScarcity => &[
                "Optimize irrigation schedule",
                "Reduce water waste and runoff",
                "Monitor weather forecasts closely",
                "Prepare contingency water sources",
            ],
            VegetationDecline => &[
                "Schedule field inspection within 7 days",
                "Review recent maintenance activities",
                "Check irrigation system functionality",
                "Monitor NDVI trends weekly",
            ],
            _ => &[
                "Increase irrigation by 30-50%",
                "Apply mulch to retain soil moisture",
                "Monitor soil moisture daily",
                "Prepare emergency water sources",
            ],
        },
        RiskLevel::Low => match cause {
            HeatStress => &[
                "Monitor weather forecasts",
                "Maintain adequate soil moisture",
                "Continue routine care",
                "Prepare for temperature increases",
            ],
            WaterScarcity => &[
                "Monitor rainfall patterns",
                "Maintain irrigation infrastructure",
                "Continue water conservation practices",
                "Review water budget",
            ],
            VegetationDecline => &[
                "Continue routine monitoring",
                "Maintain regular care schedule",
                "Document vegetation health",
                "Review growth patterns",
            ],
            _ => &[
                "Continue regular monitoring",
                "Maintain current irrigation schedule",
                "Keep mulch layers intact",
                "Review water availability",
            ],
        },
    }
}

//! Individual hazard scorers. Every scorer follows the same pattern:
//! accumulate points from independent banded conditions, each capped, then
//! clamp the total to [0, 100]. All are pure functions over the reading and
//! optional forecast data.

use crate::model::{EnvironmentalReading, ForecastDay};

/// Drought: rainfall deficit (0-40) + temperature stress (0-30) +
/// low soil moisture (0-30).
pub fn drought(reading: &EnvironmentalReading, forecast: Option<&[ForecastDay]>) -> f64 {
    let mut score: f64 = 0.0;

    let daily_rain = match forecast {
        Some(days) if !days.is_empty() => {
            let window = &days[..days.len().min(14)];
            window.iter().map(|d| d.precipitation_mm).sum::<f64>() / window.len() as f64
        }
        _ => reading.climate.rainfall_mm / 365.0,
    };
    score += if daily_rain < 1.0 {
        40.0
    } else if daily_rain < 2.0 {
        30.0
    } else if daily_rain < 3.0 {
        20.0
    } else if daily_rain < 5.0 {
        10.0
    } else {
        0.0
    };

    let temp = reading.climate.avg_temp_c;
    score += if temp > 35.0 {
        30.0
    } else if temp > 32.0 {
        20.0
    } else if temp > 30.0 {
        10.0
    } else {
        0.0
    };

    let moisture = reading.soil.moisture_pct;
    score += if moisture < 30.0 {
        30.0
    } else if moisture < 40.0 {
        20.0
    } else if moisture < 50.0 {
        10.0
    } else {
        0.0
    };

    score.clamp(0.0, 100.0)
}

/// Heat stress: peak temperature (0-50) + young-tree vulnerability (0-25) +
/// low humidity (0-25).
pub fn heat_stress(
    reading: &EnvironmentalReading,
    forecast: Option<&[ForecastDay]>,
    tree_age_years: f64,
) -> f64 {
    let mut score: f64 = 0.0;

    let peak_temp = match forecast {
        Some(days) if !days.is_empty() => days[..days.len().min(7)]
            .iter()
            .map(|d| d.temp_c)
            .fold(f64::NEG_INFINITY, f64::max),
        _ => reading.climate.max_temp_c,
    };
    score += if peak_temp > 40.0 {
        50.0
    } else if peak_temp > 38.0 {
        40.0
    } else if peak_temp > 35.0 {
        30.0
    } else if peak_temp > 33.0 {
        20.0
    } else if peak_temp > 30.0 {
        10.0
    } else {
        0.0
    };

    score += if tree_age_years < 1.0 {
        25.0
    } else if tree_age_years < 2.0 {
        15.0
    } else if tree_age_years < 3.0 {
        10.0
    } else {
        0.0
    };

    let humidity = reading.climate.humidity_pct;
    score += if humidity < 30.0 {
        25.0
    } else if humidity < 40.0 {
        15.0
    } else if humidity < 50.0 {
        10.0
    } else {
        0.0
    };

    score.clamp(0.0, 100.0)
}

/// Water scarcity: recent rainfall trend (0-35) + evaporation index (0-35) +
/// sandy-soil drainage (0-30). Captures drying soil even after earlier rain.
pub fn water_scarcity(reading: &EnvironmentalReading, forecast: Option<&[ForecastDay]>) -> f64 {
    let mut score: f64 = 0.0;

    let recent_rain = match forecast {
        Some(days) if !days.is_empty() => days[..days.len().min(7)]
            .iter()
            .map(|d| d.precipitation_mm)
            .sum::<f64>(),
        _ => reading.climate.rainfall_mm / 52.0,
    };
    score += if recent_rain < 5.0 {
        35.0
    } else if recent_rain < 10.0 {
        25.0
    } else if recent_rain < 15.0 {
        15.0
    } else {
        0.0
    };

    let evaporation_index = (reading.climate.avg_temp_c / 10.0)
        * (100.0 - reading.climate.humidity_pct)
        / 100.0;
    score += if evaporation_index > 4.0 {
        35.0
    } else if evaporation_index > 3.0 {
        25.0
    } else if evaporation_index > 2.0 {
        15.0
    } else {
        0.0
    };

    let sand = reading.soil.sand_pct;
    score += if sand > 70.0 {
        30.0
    } else if sand > 60.0 {
        20.0
    } else if sand > 50.0 {
        10.0
    } else {
        0.0
    };

    score.clamp(0.0, 100.0)
}

/// Vegetation decline: NDVI level (0-40) + health score (0-30) +
/// negative trend (0-30).
pub fn vegetation_decline(reading: &EnvironmentalReading) -> f64 {
    let mut score: f64 = 0.0;
    let veg = &reading.vegetation;

    score += if veg.ndvi < 0.2 {
        40.0
    } else if veg.ndvi < 0.3 {
        30.0
    } else if veg.ndvi < 0.4 {
        20.0
    } else if veg.ndvi < 0.5 {
        10.0
    } else {
        0.0
    };

    score += if veg.health_score < 40.0 {
        30.0
    } else if veg.health_score < 50.0 {
        20.0
    } else if veg.health_score < 60.0 {
        10.0
    } else {
        0.0
    };

    score += if veg.change_rate_pct < -5.0 {
        30.0
    } else if veg.change_rate_pct < -3.0 {
        20.0
    } else if veg.change_rate_pct < -1.0 {
        10.0
    } else {
        0.0
    };

    score.clamp(0.0, 100.0)
}

/// Flood: needs forecast data. Heavy 7-day precipitation combined with poor
/// drainage (high clay or saturated soil). `None` when not assessable or
/// conditions give no signal.
pub fn flood(reading: &EnvironmentalReading, forecast: Option<&[ForecastDay]>) -> Option<f64> {
    let days = forecast?;
    if days.is_empty() {
        return None;
    }
    let total_rain: f64 = days[..days.len().min(7)]
        .iter()
        .map(|d| d.precipitation_mm)
        .sum();
    let drainage_issue = reading.soil.clay_pct > 40.0 || reading.soil.moisture_pct > 75.0;

    if total_rain < 50.0 && !drainage_issue {
        return None;
    }
    let score = if total_rain > 100.0 && drainage_issue {
        65.0
    } else if total_rain > 75.0 {
        45.0
    } else {
        25.0
    };
    Some(score)
}

/// Pest: activity rises in warm, humid conditions; stressed vegetation is
/// more susceptible. `None` outside the favorable window.
pub fn pest(reading: &EnvironmentalReading) -> Option<f64> {
    let temp = reading.climate.avg_temp_c;
    let humidity = reading.climate.humidity_pct;
    let favorable = temp > 20.0 && temp < 30.0 && humidity > 60.0;
    if !favorable {
        return None;
    }
    let mut score = 35.0;
    if reading.vegetation.health_score < 70.0 {
        score += 20.0;
    }
    Some(score)
}

/// Disease: fungal pressure from sustained humidity and saturated soil.
pub fn disease(reading: &EnvironmentalReading) -> Option<f64> {
    let high_humidity = reading.climate.humidity_pct > 75.0;
    let poor_drainage = reading.soil.moisture_pct > 75.0;
    let stressed = reading.vegetation.health_score < 65.0;

    if !high_humidity && !poor_drainage {
        return None;
    }
    let score = if high_humidity && poor_drainage && stressed {
        60.0
    } else if high_humidity && poor_drainage {
        45.0
    } else {
        30.0
    };
    Some(score)
}

/// Fire: hot, dry air is the gate; dry vegetation and dry soil escalate.
pub fn fire(reading: &EnvironmentalReading) -> Option<f64> {
    let hot = reading.climate.avg_temp_c > 30.0;
    let dry_air = reading.climate.humidity_pct < 40.0;
    if !hot || !dry_air {
        return None;
    }
    let dry_vegetation = reading.vegetation.ndvi < 0.4;
    let dry_soil = reading.soil.moisture_pct < 30.0;

    let score = if dry_vegetation && dry_soil {
        55.0
    } else if dry_vegetation || dry_soil {
        35.0
    } else {
        20.0
    };
    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use approx::assert_relative_eq;

    fn default_reading() -> EnvironmentalReading {
        normalize(None, None, None)
    }

    fn dry_day() -> ForecastDay {
        ForecastDay {
            temp_c: 36.0,
            precipitation_mm: 0.0,
            humidity_pct: 25.0,
        }
    }

    #[test]
    fn drought_saturates_on_arid_reading() {
        let mut reading = default_reading();
        reading.soil.moisture_pct = 25.0;
        reading.climate.rainfall_mm = 150.0;
        reading.climate.avg_temp_c = 38.0;

        // 150/365 mm/day < 1 (40) + 38 C (30) + moisture 25 (30)
        assert_relative_eq!(drought(&reading, None), 100.0);
    }

    #[test]
    fn drought_prefers_forecast_over_annual_rainfall() {
        let mut reading = default_reading();
        reading.climate.rainfall_mm = 2000.0;
        let forecast = vec![dry_day(); 14];

        // Forecast says bone dry even though the annual normal is wet.
        let with_forecast = drought(&reading, Some(&forecast));
        let without = drought(&reading, None);
        assert!(with_forecast > without);
    }

    #[test]
    fn heat_stress_age_bands() {
        let reading = default_reading();
        let seedling = heat_stress(&reading, None, 0.5);
        let sapling = heat_stress(&reading, None, 2.5);
        let mature = heat_stress(&reading, None, 5.0);
        assert_relative_eq!(seedling - mature, 25.0);
        assert_relative_eq!(sapling - mature, 10.0);
    }

    #[test]
    fn water_scarcity_evaporation_index() {
        let mut reading = default_reading();
        // temp 40, humidity 20 -> index (40/10)*(80/100) = 3.2 -> 25 points
        reading.climate.avg_temp_c = 40.0;
        reading.climate.humidity_pct = 20.0;
        reading.climate.rainfall_mm = 2000.0; // weekly ~38 -> no rain points
        reading.soil.sand_pct = 40.0; // no drainage points

        assert_relative_eq!(water_scarcity(&reading, None), 25.0);
    }

    #[test]
    fn vegetation_decline_compounds_level_health_and_trend() {
        let mut reading = default_reading();
        reading.vegetation.ndvi = 0.15;
        reading.vegetation.health_score = 35.0;
        reading.vegetation.change_rate_pct = -6.0;

        assert_relative_eq!(vegetation_decline(&reading), 100.0);
    }

    #[test]
    fn flood_requires_forecast() {
        let reading = default_reading();
        assert!(flood(&reading, None).is_none());

        let wet = vec![
            ForecastDay {
                temp_c: 24.0,
                precipitation_mm: 20.0,
                humidity_pct: 90.0,
            };
            7
        ];
        let mut saturated = default_reading();
        saturated.soil.moisture_pct = 80.0;
        assert_relative_eq!(flood(&saturated, Some(&wet)).unwrap(), 65.0);
    }

    #[test]
    fn quiescent_hazards_return_none() {
        let reading = default_reading();
        // Defaults: 25 C, 65% humidity, moist loam -> no fire, no disease.
        assert!(fire(&reading).is_none());
        assert!(disease(&reading).is_none());
        // But warm + humid is pest-favorable.
        assert!(pest(&reading).is_some());
    }
}

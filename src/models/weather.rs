use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Conditions at fetch time, metric units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub wind_speed_kmh: f64,
    /// Solar radiation proxy in MJ/m²/day, when the provider has one
    pub solar_radiation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub precipitation_mm: f64,
    /// 0.0-1.0
    pub precipitation_probability: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
}

/// Current conditions plus an ordered daily forecast (earliest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
}

impl WeatherSnapshot {
    /// Total precipitation over the first `days` forecast records.
    ///
    /// Negative and non-finite values count as zero.
    pub fn precipitation_next_days(&self, days: usize) -> f64 {
        self.forecast
            .iter()
            .take(days)
            .map(|d| d.precipitation_mm)
            .filter(|p| p.is_finite() && *p > 0.0)
            .sum()
    }

    pub fn max_temp_next_days(&self, days: usize) -> Option<f64> {
        self.forecast
            .iter()
            .take(days)
            .map(|d| d.temp_max_c)
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}

/// Best-effort air-quality reading; never required for a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySnapshot {
    /// Provider index, 1 (good) to 5 (very poor)
    pub aqi: u8,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
}

impl AirQualitySnapshot {
    pub fn label(&self) -> &'static str {
        match self.aqi {
            1 => "Good",
            2 => "Fair",
            3 => "Moderate",
            4 => "Poor",
            5 => "Very Poor",
            _ => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: i64, precip: f64) -> DailyForecast {
        DailyForecast {
            date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap() + chrono::Duration::days(offset),
            precipitation_mm: precip,
            precipitation_probability: 0.5,
            temp_min_c: 15.0,
            temp_max_c: 25.0 + offset as f64,
        }
    }

    fn snapshot(precip: &[f64]) -> WeatherSnapshot {
        WeatherSnapshot {
            fetched_at: Utc::now(),
            current: CurrentConditions {
                temperature_c: 22.0,
                humidity_percent: 60.0,
                wind_speed_kmh: 8.0,
                solar_radiation: None,
            },
            forecast: precip
                .iter()
                .enumerate()
                .map(|(i, p)| day(i as i64, *p))
                .collect(),
        }
    }

    #[test]
    fn precipitation_sums_leading_days_only() {
        let weather = snapshot(&[2.0, 3.0, 4.0, 50.0]);
        assert!((weather.precipitation_next_days(3) - 9.0).abs() < 1e-9);
        assert!((weather.precipitation_next_days(10) - 59.0).abs() < 1e-9);
        assert_eq!(weather.precipitation_next_days(0), 0.0);
    }

    #[test]
    fn precipitation_ignores_bad_values() {
        let weather = snapshot(&[f64::NAN, -4.0, 1.5]);
        assert!((weather.precipitation_next_days(3) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn max_temp_over_window() {
        let weather = snapshot(&[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(weather.max_temp_next_days(2), Some(26.0));
        assert_eq!(snapshot(&[]).max_temp_next_days(3), None);
    }

    #[test]
    fn air_quality_labels() {
        let aq = AirQualitySnapshot {
            aqi: 2,
            pm2_5: Some(12.0),
            pm10: None,
        };
        assert_eq!(aq.label(), "Fair");
        assert_eq!(AirQualitySnapshot { aqi: 9, ..aq }.label(), "Unknown");
    }
}

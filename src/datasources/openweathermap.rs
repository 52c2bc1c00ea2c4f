use crate::config::OpenWeatherMapConfig;
use crate::error::{IrrigoError, Result};
use crate::models::{
    AirQualitySnapshot, Coordinates, CurrentConditions, DailyForecast, WeatherSnapshot,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// m/s -> km/h
const MS_TO_KMH: f64 = 3.6;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: OwmMain,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    #[serde(default)]
    pop: f64, // probability of precipitation
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
    #[serde(default)]
    snow: Option<OwmPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "3h", default)]
    three_hour: f64,
}

#[derive(Debug, Deserialize)]
struct OwmAirPollutionResponse {
    list: Vec<OwmAirPollutionItem>,
}

#[derive(Debug, Deserialize)]
struct OwmAirPollutionItem {
    main: OwmAqi,
    #[serde(default)]
    components: OwmComponents,
}

#[derive(Debug, Deserialize)]
struct OwmAqi {
    aqi: u8,
}

#[derive(Debug, Default, Deserialize)]
struct OwmComponents {
    pm2_5: Option<f64>,
    pm10: Option<f64>,
}

/// One 3-hour forecast slot, already in the units the engine uses
#[derive(Debug, Clone, PartialEq)]
struct ForecastSlot {
    timestamp: DateTime<Utc>,
    temp_c: f64,
    precipitation_mm: f64,
    precipitation_prob: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Current conditions plus the 5-day/3-hour forecast rolled up by day
    pub async fn fetch_weather(&self, coordinates: Coordinates) -> Result<WeatherSnapshot> {
        let (current, forecast) = tokio::try_join!(
            self.fetch_current(coordinates),
            self.fetch_forecast(coordinates)
        )?;

        if forecast.is_empty() {
            return Err(IrrigoError::WeatherUnavailable(
                "OpenWeatherMap returned an empty forecast".into(),
            ));
        }

        Ok(WeatherSnapshot {
            fetched_at: Utc::now(),
            current,
            forecast,
        })
    }

    async fn fetch_current(&self, coordinates: Coordinates) -> Result<CurrentConditions> {
        let response: OwmCurrentResponse = self
            .get_json("weather", coordinates)
            .await
            .map_err(IrrigoError::WeatherUnavailable)?;

        Ok(CurrentConditions {
            temperature_c: response.main.temp,
            humidity_percent: response.main.humidity,
            wind_speed_kmh: response.wind.speed * MS_TO_KMH,
            solar_radiation: None,
        })
    }

    async fn fetch_forecast(&self, coordinates: Coordinates) -> Result<Vec<DailyForecast>> {
        let response: OwmForecastResponse = self
            .get_json("forecast", coordinates)
            .await
            .map_err(IrrigoError::WeatherUnavailable)?;

        let slots: Vec<ForecastSlot> = response.list.iter().map(convert_forecast_item).collect();
        Ok(aggregate_daily(&slots))
    }

    pub async fn fetch_air_quality(&self, coordinates: Coordinates) -> Result<AirQualitySnapshot> {
        let response: OwmAirPollutionResponse = self
            .get_json("air_pollution", coordinates)
            .await
            .map_err(IrrigoError::DataSourceUnavailable)?;

        let item = response.list.into_iter().next().ok_or_else(|| {
            IrrigoError::DataSourceUnavailable("OpenWeatherMap returned no air quality data".into())
        })?;

        Ok(AirQualitySnapshot {
            aqi: item.main.aqi,
            pm2_5: item.components.pm2_5,
            pm10: item.components.pm10,
        })
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, coordinates: Coordinates) -> Result<bool> {
        let response = self
            .client
            .get(self.url("weather", coordinates))
            .send()
            .await?;

        Ok(response.status().is_success())
    }

    fn url(&self, endpoint: &str, coordinates: Coordinates) -> String {
        format!(
            "{}/{}?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, endpoint, coordinates.latitude, coordinates.longitude, self.config.api_key
        )
    }

    /// GET an endpoint and decode it; failures come back as a message for the
    /// caller to wrap in its own error kind
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        coordinates: Coordinates,
    ) -> std::result::Result<T, String> {
        let response = self
            .client
            .get(self.url(endpoint, coordinates))
            .send()
            .await
            .map_err(|e| format!("OpenWeatherMap: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("OpenWeatherMap returned {}: {}", status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse OpenWeatherMap response: {}", e))
    }
}

fn convert_forecast_item(item: &OwmForecastItem) -> ForecastSlot {
    let timestamp = DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now);

    // Combine rain and snow precipitation
    let rain_mm = item.rain.as_ref().map(|r| r.three_hour).unwrap_or(0.0);
    let snow_mm = item.snow.as_ref().map(|s| s.three_hour).unwrap_or(0.0);

    ForecastSlot {
        timestamp,
        temp_c: item.main.temp,
        precipitation_mm: rain_mm + snow_mm,
        precipitation_prob: item.pop,
    }
}

/// Group 3-hour slots by UTC date into daily records, earliest first
fn aggregate_daily(slots: &[ForecastSlot]) -> Vec<DailyForecast> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&ForecastSlot>> = BTreeMap::new();
    for slot in slots {
        by_date
            .entry(slot.timestamp.date_naive())
            .or_default()
            .push(slot);
    }

    by_date
        .into_iter()
        .map(|(date, slots)| aggregate_day(date, &slots))
        .collect()
}

fn aggregate_day(date: NaiveDate, slots: &[&ForecastSlot]) -> DailyForecast {
    let temp_max_c = slots
        .iter()
        .map(|s| s.temp_c)
        .fold(f64::NEG_INFINITY, f64::max);
    let temp_min_c = slots.iter().map(|s| s.temp_c).fold(f64::INFINITY, f64::min);

    DailyForecast {
        date,
        precipitation_mm: slots.iter().map(|s| s.precipitation_mm).sum(),
        precipitation_probability: slots
            .iter()
            .map(|s| s.precipitation_prob)
            .fold(0.0, f64::max),
        temp_min_c,
        temp_max_c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_config() -> OpenWeatherMapConfig {
        OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            enabled: true,
        }
    }

    fn slot(day: u32, hour: u32, temp_c: f64, precip: f64, prob: f64) -> ForecastSlot {
        ForecastSlot {
            timestamp: Utc.with_ymd_and_hms(2026, 7, day, hour, 0, 0).unwrap(),
            temp_c,
            precipitation_mm: precip,
            precipitation_prob: prob,
        }
    }

    #[test]
    fn client_creation() {
        let client = OpenWeatherMapClient::new(sample_config());
        assert!(client.config.enabled);
    }

    #[test]
    fn url_uses_metric_units() {
        let client = OpenWeatherMapClient::new(sample_config());
        let url = client.url("forecast", Coordinates::new(-1.5, 36.25));
        assert!(url.ends_with("lat=-1.5&lon=36.25&appid=test_key&units=metric"));
        assert!(url.contains("/forecast?"));
    }

    #[test]
    fn forecast_item_combines_rain_and_snow() {
        let json = r#"{
            "dt": 1782900000,
            "main": {"temp": 21.5, "humidity": 70, "feels_like": 21.0},
            "pop": 0.65,
            "rain": {"3h": 1.2},
            "snow": {"3h": 0.3}
        }"#;
        let item: OwmForecastItem = serde_json::from_str(json).unwrap();
        let slot = convert_forecast_item(&item);
        assert!((slot.precipitation_mm - 1.5).abs() < 1e-9);
        assert_eq!(slot.precipitation_prob, 0.65);
        assert_eq!(slot.temp_c, 21.5);
    }

    #[test]
    fn daily_aggregation_is_ordered_and_summed() {
        let slots = vec![
            slot(3, 0, 18.0, 0.0, 0.1),
            slot(2, 12, 30.0, 2.0, 0.4),
            slot(2, 0, 20.0, 1.5, 0.7),
            slot(3, 12, 27.0, 4.0, 0.9),
        ];
        let days = aggregate_daily(&slots);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 7, 2).unwrap());
        assert!((days[0].precipitation_mm - 3.5).abs() < 1e-9);
        assert_eq!(days[0].precipitation_probability, 0.7);
        assert_eq!(days[0].temp_min_c, 20.0);
        assert_eq!(days[0].temp_max_c, 30.0);
        assert!((days[1].precipitation_mm - 4.0).abs() < 1e-9);
    }

    #[test]
    fn air_pollution_response_parses() {
        let json = r#"{"list": [{
            "main": {"aqi": 3},
            "components": {"pm2_5": 18.4, "pm10": 30.1, "o3": 60.0}
        }]}"#;
        let response: OwmAirPollutionResponse = serde_json::from_str(json).unwrap();
        let item = &response.list[0];
        assert_eq!(item.main.aqi, 3);
        assert_eq!(item.components.pm2_5, Some(18.4));
    }
}

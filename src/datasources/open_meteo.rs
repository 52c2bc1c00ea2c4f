use crate::config::OpenMeteoConfig;
use crate::error::{IrrigoError, Result};
use crate::logic::water_balance::water_holding_capacity;
use crate::models::{Coordinates, Drainage, SoilSnapshot, SoilTexture};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// Root-zone layers averaged into one volumetric reading
const MOISTURE_LAYERS: [&str; 3] = [
    "soil_moisture_3_to_9cm",
    "soil_moisture_9_to_27cm",
    "soil_moisture_27_to_81cm",
];
const TEMPERATURE_LAYER: &str = "soil_temperature_6cm";
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub struct OpenMeteoSoilClient {
    client: reqwest::Client,
    config: OpenMeteoConfig,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    hourly: OmHourly,
}

#[derive(Debug, Default, Deserialize)]
struct OmHourly {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    soil_moisture_3_to_9cm: Vec<Option<f64>>,
    #[serde(default)]
    soil_moisture_9_to_27cm: Vec<Option<f64>>,
    #[serde(default)]
    soil_moisture_27_to_81cm: Vec<Option<f64>>,
    #[serde(default)]
    soil_temperature_6cm: Vec<Option<f64>>,
}

/// Volumetric water content (m³/m³) at field capacity and wilting point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoistureLimits {
    pub field_capacity: f64,
    pub wilting_point: f64,
}

pub fn moisture_limits(texture: SoilTexture) -> MoistureLimits {
    let (field_capacity, wilting_point) = match texture {
        SoilTexture::Sand => (0.10, 0.04),
        SoilTexture::LoamySand => (0.14, 0.06),
        SoilTexture::SandyLoam => (0.20, 0.08),
        SoilTexture::Loam => (0.27, 0.12),
        SoilTexture::SiltLoam => (0.33, 0.13),
        SoilTexture::Silt => (0.32, 0.12),
        SoilTexture::ClayLoam => (0.34, 0.18),
        SoilTexture::Clay => (0.40, 0.24),
        SoilTexture::Unknown => (0.30, 0.13),
    };
    MoistureLimits {
        field_capacity,
        wilting_point,
    }
}

/// Volumetric water content as percent of plant-available capacity, 0-100
pub fn vwc_to_percent_of_capacity(vwc: f64, texture: SoilTexture) -> f64 {
    let limits = moisture_limits(texture);
    let available = limits.field_capacity - limits.wilting_point;
    let pct = (vwc - limits.wilting_point) / available * 100.0;
    pct.clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SoilReading {
    observed_at: DateTime<Utc>,
    vwc: f64,
    temperature_c: Option<f64>,
}

impl OpenMeteoSoilClient {
    pub fn new(config: OpenMeteoConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub async fn fetch_soil(
        &self,
        coordinates: Coordinates,
        texture: SoilTexture,
    ) -> Result<SoilSnapshot> {
        let response = self
            .client
            .get(self.url(coordinates))
            .send()
            .await
            .map_err(|e| IrrigoError::SoilUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            return Err(IrrigoError::SoilUnavailable(format!(
                "Open-Meteo returned {}",
                response.status()
            )));
        }

        let data: OmResponse = response.json().await.map_err(|e| {
            IrrigoError::SoilUnavailable(format!("Failed to parse Open-Meteo response: {}", e))
        })?;

        let reading = latest_reading(&data.hourly, Utc::now()).ok_or_else(|| {
            IrrigoError::SoilUnavailable("Open-Meteo returned no usable soil moisture".into())
        })?;

        let percentage = vwc_to_percent_of_capacity(reading.vwc, texture);
        tracing::debug!(
            "Open-Meteo soil at {}: vwc {:.3} -> {:.0}% of capacity ({})",
            coordinates,
            reading.vwc,
            percentage,
            texture
        );

        let mut snapshot = SoilSnapshot::measured(texture, water_holding_capacity(texture))
            .with_moisture(percentage);
        snapshot.observed_at = reading.observed_at;
        snapshot.temperature_c = reading.temperature_c;
        snapshot.drainage = Some(Drainage::for_texture(texture));
        Ok(snapshot)
    }

    pub async fn test_connection(&self, coordinates: Coordinates) -> Result<bool> {
        let response = self.client.get(self.url(coordinates)).send().await?;
        Ok(response.status().is_success())
    }

    fn url(&self, coordinates: Coordinates) -> String {
        let mut hourly: Vec<&str> = MOISTURE_LAYERS.to_vec();
        hourly.push(TEMPERATURE_LAYER);
        format!(
            "{}/forecast?latitude={}&longitude={}&hourly={}\
             &past_days=1&forecast_days=1&timezone=UTC",
            self.config.base_url.trim_end_matches('/'),
            coordinates.latitude,
            coordinates.longitude,
            hourly.join(",")
        )
    }
}

/// Latest hour at or before `now` with at least one moisture layer reported
fn latest_reading(hourly: &OmHourly, now: DateTime<Utc>) -> Option<SoilReading> {
    let layers = [
        &hourly.soil_moisture_3_to_9cm,
        &hourly.soil_moisture_9_to_27cm,
        &hourly.soil_moisture_27_to_81cm,
    ];

    hourly
        .time
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(i, time)| {
            let observed_at = NaiveDateTime::parse_from_str(time, TIME_FORMAT)
                .ok()?
                .and_utc();
            if observed_at > now {
                return None;
            }

            let values: Vec<f64> = layers
                .iter()
                .filter_map(|layer| layer.get(i).copied().flatten())
                .filter(|v| v.is_finite() && *v >= 0.0)
                .collect();
            if values.is_empty() {
                return None;
            }

            Some(SoilReading {
                observed_at,
                vwc: values.iter().sum::<f64>() / values.len() as f64,
                temperature_c: hourly
                    .soil_temperature_6cm
                    .get(i)
                    .copied()
                    .flatten()
                    .filter(|t| t.is_finite()),
            })
        })
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hourly_json() -> &'static str {
        r#"{
            "latitude": -1.25,
            "longitude": 36.75,
            "hourly": {
                "time": [
                    "2026-07-01T10:00", "2026-07-01T11:00",
                    "2026-07-01T12:00", "2026-07-01T13:00"
                ],
                "soil_moisture_3_to_9cm": [0.20, 0.19, null, 0.10],
                "soil_moisture_9_to_27cm": [0.22, 0.21, null, 0.10],
                "soil_moisture_27_to_81cm": [0.24, 0.23, null, 0.10],
                "soil_temperature_6cm": [18.5, 19.0, 19.5, 20.0]
            }
        }"#
    }

    #[test]
    fn percent_of_capacity_is_clamped() {
        // loam: wp .12, fc .27
        assert!((vwc_to_percent_of_capacity(0.195, SoilTexture::Loam) - 50.0).abs() < 1e-9);
        assert_eq!(vwc_to_percent_of_capacity(0.05, SoilTexture::Loam), 0.0);
        assert_eq!(vwc_to_percent_of_capacity(0.45, SoilTexture::Loam), 100.0);
    }

    #[test]
    fn limits_are_ordered() {
        for texture in [
            SoilTexture::Sand,
            SoilTexture::LoamySand,
            SoilTexture::SandyLoam,
            SoilTexture::Loam,
            SoilTexture::SiltLoam,
            SoilTexture::Silt,
            SoilTexture::ClayLoam,
            SoilTexture::Clay,
            SoilTexture::Unknown,
        ] {
            let l = moisture_limits(texture);
            assert!(l.field_capacity > l.wilting_point, "{}", texture);
        }
    }

    #[test]
    fn picks_latest_hour_with_values_before_now() {
        let data: OmResponse = serde_json::from_str(hourly_json()).unwrap();
        // 13:00 is in the future and 12:00 has no moisture, so 11:00 wins
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 12, 30, 0).unwrap();
        let reading = latest_reading(&data.hourly, now).unwrap();

        assert_eq!(
            reading.observed_at,
            Utc.with_ymd_and_hms(2026, 7, 1, 11, 0, 0).unwrap()
        );
        assert!((reading.vwc - 0.21).abs() < 1e-9);
        assert_eq!(reading.temperature_c, Some(19.0));
    }

    #[test]
    fn partial_layers_are_averaged() {
        let hourly = OmHourly {
            time: vec!["2026-07-01T06:00".into()],
            soil_moisture_3_to_9cm: vec![Some(0.30)],
            soil_moisture_9_to_27cm: vec![None],
            soil_moisture_27_to_81cm: vec![Some(0.20)],
            soil_temperature_6cm: vec![],
        };
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 7, 0, 0).unwrap();
        let reading = latest_reading(&hourly, now).unwrap();
        assert!((reading.vwc - 0.25).abs() < 1e-9);
        assert_eq!(reading.temperature_c, None);
    }

    #[test]
    fn no_usable_values_is_none() {
        let hourly = OmHourly {
            time: vec!["2026-07-01T06:00".into(), "garbage".into()],
            soil_moisture_3_to_9cm: vec![None, Some(0.2)],
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 7, 0, 0).unwrap();
        assert!(latest_reading(&hourly, now).is_none());
        assert!(latest_reading(&OmHourly::default(), now).is_none());
    }

    #[test]
    fn url_requests_root_zone_layers() {
        let client = OpenMeteoSoilClient::new(OpenMeteoConfig {
            base_url: "https://example.test/v1/".into(),
            enabled: true,
        });
        let url = client.url(Coordinates::new(10.0, -20.5));
        assert!(url.starts_with("https://example.test/v1/forecast?latitude=10&longitude=-20.5"));
        assert!(url.contains("soil_moisture_27_to_81cm,soil_temperature_6cm"));
        assert!(url.ends_with("timezone=UTC"));
    }
}

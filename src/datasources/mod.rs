pub mod open_meteo;
pub mod openweathermap;

pub use open_meteo::OpenMeteoSoilClient;
pub use openweathermap::OpenWeatherMapClient;

use crate::config::Config;
use crate::error::{IrrigoError, Result};
use crate::models::{AirQualitySnapshot, Coordinates, SoilSnapshot, SoilTexture, WeatherSnapshot};
use std::future::Future;

/// Contract the recommendation engine needs from whatever supplies telemetry.
///
/// Caching, retries and timeouts belong to implementations, never to callers.
pub trait EnvironmentalDataSource: Send + Sync {
    /// Current conditions plus an ordered daily forecast.
    /// Fails with `IrrigoError::WeatherUnavailable`.
    fn fetch_weather(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Result<WeatherSnapshot>> + Send;

    /// Soil state near the coordinates. `texture` is the caller's hint when the
    /// provider cannot determine texture itself.
    /// Fails with `IrrigoError::SoilUnavailable`.
    fn fetch_soil(
        &self,
        coordinates: Coordinates,
        texture: SoilTexture,
    ) -> impl Future<Output = Result<SoilSnapshot>> + Send;

    /// Best-effort; `None` on any failure.
    fn fetch_air_quality(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Option<AirQualitySnapshot>> + Send;
}

/// Production data source: OpenWeatherMap for weather/air quality, Open-Meteo for soil
pub struct EnvironmentalClient {
    openweathermap: Option<OpenWeatherMapClient>,
    open_meteo: Option<OpenMeteoSoilClient>,
}

impl EnvironmentalClient {
    pub fn new(config: &Config) -> Self {
        let openweathermap = config
            .openweathermap
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty())
            .map(|c| {
                tracing::info!("OpenWeatherMap client configured for weather data");
                OpenWeatherMapClient::new(c.clone())
            });

        if openweathermap.is_none() {
            tracing::warn!(
                "OpenWeatherMap not configured - recommendations will fail without weather data"
            );
        }

        let open_meteo = if config.open_meteo.enabled {
            Some(OpenMeteoSoilClient::new(config.open_meteo.clone()))
        } else {
            tracing::info!("Open-Meteo soil data disabled - soil will be estimated from texture");
            None
        };

        Self {
            openweathermap,
            open_meteo,
        }
    }

    pub async fn check_connections(&self, coordinates: Coordinates) -> ConnectionStatus {
        let mut status = ConnectionStatus::default();

        if let Some(ref client) = self.openweathermap {
            status.openweathermap = client.test_connection(coordinates).await.unwrap_or(false);
        }

        if let Some(ref client) = self.open_meteo {
            status.open_meteo = client.test_connection(coordinates).await.unwrap_or(false);
        }

        status
    }
}

impl EnvironmentalDataSource for EnvironmentalClient {
    async fn fetch_weather(&self, coordinates: Coordinates) -> Result<WeatherSnapshot> {
        match self.openweathermap {
            Some(ref client) => client.fetch_weather(coordinates).await,
            None => Err(IrrigoError::WeatherUnavailable(
                "no weather provider configured".into(),
            )),
        }
    }

    async fn fetch_soil(
        &self,
        coordinates: Coordinates,
        texture: SoilTexture,
    ) -> Result<SoilSnapshot> {
        match self.open_meteo {
            Some(ref client) => client.fetch_soil(coordinates, texture).await,
            None => Err(IrrigoError::SoilUnavailable(
                "no soil provider configured".into(),
            )),
        }
    }

    async fn fetch_air_quality(&self, coordinates: Coordinates) -> Option<AirQualitySnapshot> {
        let client = self.openweathermap.as_ref()?;
        match client.fetch_air_quality(coordinates).await {
            Ok(aq) => Some(aq),
            Err(e) => {
                tracing::debug!("Air quality unavailable: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub openweathermap: bool,
    pub open_meteo: bool,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.openweathermap && self.open_meteo
    }

    /// Weather is the hard prerequisite for any recommendation
    pub fn can_recommend(&self) -> bool {
        self.openweathermap
    }
}

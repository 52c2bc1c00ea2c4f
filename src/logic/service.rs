use super::advisories::build_advisories;
use super::evapotranspiration::compute_et;
use super::rules::DecisionEngine;
use super::water_balance::{compute_balance, water_holding_capacity};
use crate::config::AdvisoryConfig;
use crate::datasources::EnvironmentalDataSource;
use crate::error::{IrrigoError, Result};
use crate::models::{
    DataAvailability, DataSourceInfo, RecommendationRequest, RecommendationResult, Reliability,
    ResultMetadata, SoilAvailability, SoilSnapshot, SoilTexture, WeatherAvailability,
    WeatherSnapshot,
};
use chrono::{DateTime, Utc};

/// Moisture (percent of capacity) assumed for a field whose soil could not be observed
pub const DEFAULT_SOIL_MOISTURE_PERCENT: f64 = 50.0;

/// Outcome of the weather and soil fetches once the fatal cases are ruled out
#[derive(Debug)]
pub enum DataState {
    /// Both providers answered
    BothAvailable {
        weather: WeatherSnapshot,
        soil: SoilSnapshot,
    },
    /// Soil failed; the recommendation proceeds on texture defaults
    WeatherOnly {
        weather: WeatherSnapshot,
        soil_error: IrrigoError,
    },
}

impl DataState {
    /// Weather is required. Soil is optional.
    pub fn classify(
        weather: Result<WeatherSnapshot>,
        soil: Result<SoilSnapshot>,
    ) -> Result<Self> {
        match (weather, soil) {
            (Ok(weather), Ok(soil)) => Ok(DataState::BothAvailable { weather, soil }),
            (Ok(weather), Err(soil_error)) => Ok(DataState::WeatherOnly { weather, soil_error }),
            (Err(weather_error), Err(soil_error)) => Err(IrrigoError::InsufficientData {
                weather: weather_error.to_string(),
                soil: soil_error.to_string(),
            }),
            (Err(IrrigoError::WeatherUnavailable(msg)), Ok(_)) => {
                Err(IrrigoError::WeatherUnavailable(msg))
            }
            (Err(other), Ok(_)) => Err(IrrigoError::WeatherUnavailable(other.to_string())),
        }
    }
}

/// Snapshot used in place of a soil reading: texture lookup, half-full root zone
pub fn default_soil(texture: SoilTexture, now: DateTime<Utc>) -> SoilSnapshot {
    SoilSnapshot::synthesized(
        texture,
        water_holding_capacity(texture),
        DEFAULT_SOIL_MOISTURE_PERCENT,
        now,
    )
}

pub fn data_source_for(soil: &SoilSnapshot) -> DataSourceInfo {
    if soil.is_measured() {
        DataSourceInfo {
            weather: WeatherAvailability::Real,
            soil: SoilAvailability::Real,
            reliability: Reliability::High,
        }
    } else {
        DataSourceInfo {
            weather: WeatherAvailability::Real,
            soil: SoilAvailability::Limited,
            reliability: Reliability::Limited,
        }
    }
}

/// Fetches telemetry, applies the degradation policy and runs the pure
/// calculators in order: ET, water balance, decision, advisories.
pub struct RecommendationService<S> {
    source: S,
    engine: DecisionEngine,
    advisory: AdvisoryConfig,
}

impl<S: EnvironmentalDataSource> RecommendationService<S> {
    pub fn new(source: S, advisory: AdvisoryConfig) -> Self {
        let engine = DecisionEngine::new();
        tracing::debug!("Decision rules in order: {:?}", engine.list_rules());

        Self {
            source,
            engine,
            advisory,
        }
    }

    pub async fn build_recommendation(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult> {
        self.build_recommendation_at(request, Utc::now()).await
    }

    /// Same as `build_recommendation` with the clock pinned to `now`.
    /// Identical inputs and provider responses give identical results.
    pub async fn build_recommendation_at(
        &self,
        request: &RecommendationRequest,
        now: DateTime<Utc>,
    ) -> Result<RecommendationResult> {
        request.validate()?;

        let coordinates = request.coordinates;
        let texture = request.soil_texture();

        let (weather, soil, air_quality) = tokio::join!(
            self.source.fetch_weather(coordinates),
            self.source.fetch_soil(coordinates, texture),
            self.source.fetch_air_quality(coordinates),
        );

        let mut warnings = Vec::new();
        let state = DataState::classify(weather, soil).inspect_err(|e| {
            tracing::warn!("Cannot build recommendation for {}: {}", coordinates, e);
        })?;

        let (weather, soil) = match state {
            DataState::BothAvailable { weather, soil } => (weather, soil),
            DataState::WeatherOnly {
                weather,
                soil_error,
            } => {
                tracing::warn!(
                    "Soil data unavailable for {}, using {} defaults: {}",
                    coordinates,
                    texture,
                    soil_error
                );
                warnings.push(format!(
                    "Soil data unavailable ({}); assuming {:.0}% moisture for {} soil",
                    soil_error, DEFAULT_SOIL_MOISTURE_PERCENT, texture
                ));
                (weather, default_soil(texture, now))
            }
        };

        let data_source = data_source_for(&soil);

        let et_estimate = compute_et(&weather.current, request.crop(), request.growth_stage);
        let water_balance = compute_balance(
            &et_estimate,
            &weather,
            &soil,
            texture,
            request.last_irrigation_date,
            now.date_naive(),
        );

        let recommendation = self
            .engine
            .decide(
                &water_balance,
                &weather,
                &et_estimate,
                request.field_size_hectares,
            )
            .with_data_source(data_source);

        let advisories = build_advisories(&recommendation, &weather.current, &self.advisory, now);

        tracing::info!(
            "Recommendation for {} ({} / {}): {} - {}L, reliability {}",
            coordinates,
            et_estimate.crop,
            request.growth_stage,
            recommendation.status,
            recommendation.amount_liters,
            data_source.reliability
        );

        let metadata = ResultMetadata {
            generated_at: now,
            data_availability: DataAvailability {
                weather: true,
                soil: soil.is_measured(),
                air_quality: air_quality.is_some(),
            },
            warnings,
            reliability: data_source.reliability,
        };

        Ok(RecommendationResult {
            request: request.clone(),
            recommendation,
            water_balance,
            et_estimate,
            weather,
            soil,
            air_quality,
            advisories,
            metadata,
        })
    }
}

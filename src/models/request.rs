use super::field::{CropKind, GrowthStage, SoilTexture};
use crate::error::{IrrigoError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One advisory query for one field. Built by the caller, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub coordinates: Coordinates,
    /// Free-form crop name as entered by the farmer
    pub crop_type: String,
    pub growth_stage: GrowthStage,
    pub soil_type: Option<SoilTexture>,
    pub field_size_hectares: f64,
    pub last_irrigation_date: Option<NaiveDate>,
}

impl RecommendationRequest {
    pub fn new(
        coordinates: Coordinates,
        crop_type: impl Into<String>,
        growth_stage: GrowthStage,
        field_size_hectares: f64,
    ) -> Self {
        Self {
            coordinates,
            crop_type: crop_type.into(),
            growth_stage,
            soil_type: None,
            field_size_hectares,
            last_irrigation_date: None,
        }
    }

    pub fn with_soil_type(mut self, soil_type: SoilTexture) -> Self {
        self.soil_type = Some(soil_type);
        self
    }

    pub fn with_last_irrigation(mut self, date: NaiveDate) -> Self {
        self.last_irrigation_date = Some(date);
        self
    }

    pub fn crop(&self) -> CropKind {
        CropKind::normalize(&self.crop_type)
    }

    pub fn soil_texture(&self) -> SoilTexture {
        self.soil_type.unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.coordinates.is_valid() {
            return Err(IrrigoError::InvalidRequest(format!(
                "coordinates out of range: {}",
                self.coordinates
            )));
        }

        if !self.field_size_hectares.is_finite() || self.field_size_hectares <= 0.0 {
            return Err(IrrigoError::InvalidRequest(format!(
                "field size must be positive, got {} ha",
                self.field_size_hectares
            )));
        }

        Ok(())
    }
}

use super::field::SoilTexture;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a soil snapshot came from. Drives the reliability rating downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilProvenance {
    Measured,
    Default,
}

impl SoilProvenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilProvenance::Measured => "measured",
            SoilProvenance::Default => "default",
        }
    }
}

impl std::fmt::Display for SoilProvenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Drainage {
    Poor,
    Moderate,
    Good,
    Excessive,
}

impl Drainage {
    /// Typical drainage class for a texture
    pub fn for_texture(texture: SoilTexture) -> Self {
        match texture {
            SoilTexture::Sand | SoilTexture::LoamySand => Drainage::Excessive,
            SoilTexture::SandyLoam | SoilTexture::Loam => Drainage::Good,
            SoilTexture::SiltLoam | SoilTexture::Silt | SoilTexture::ClayLoam => {
                Drainage::Moderate
            }
            SoilTexture::Clay => Drainage::Poor,
            SoilTexture::Unknown => Drainage::Moderate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Drainage::Poor => "Poor",
            Drainage::Moderate => "Moderate",
            Drainage::Good => "Good",
            Drainage::Excessive => "Excessive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilSnapshot {
    pub observed_at: DateTime<Utc>,
    pub texture: SoilTexture,
    /// Root-zone moisture as percent of capacity (0-100), when measured
    pub moisture_percentage: Option<f64>,
    pub water_holding_capacity_mm_per_m: f64,
    pub temperature_c: Option<f64>,
    pub ph: Option<f64>,
    pub organic_matter_percent: Option<f64>,
    pub drainage: Option<Drainage>,
    /// Starting fill fraction for the estimated balance; engine default applies when absent
    pub assumed_start_fraction: Option<f64>,
    pub provenance: SoilProvenance,
}

impl SoilSnapshot {
    /// A measured snapshot as returned by a soil provider
    pub fn measured(texture: SoilTexture, water_holding_capacity_mm_per_m: f64) -> Self {
        Self {
            observed_at: Utc::now(),
            texture,
            moisture_percentage: None,
            water_holding_capacity_mm_per_m,
            temperature_c: None,
            ph: None,
            organic_matter_percent: None,
            drainage: None,
            assumed_start_fraction: None,
            provenance: SoilProvenance::Measured,
        }
    }

    /// Stand-in used when no soil provider answered. The moisture figure is
    /// an assumption, flagged by `SoilProvenance::Default`.
    pub fn synthesized(
        texture: SoilTexture,
        water_holding_capacity_mm_per_m: f64,
        assumed_moisture_percentage: f64,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            observed_at,
            texture,
            moisture_percentage: Some(assumed_moisture_percentage),
            water_holding_capacity_mm_per_m,
            temperature_c: None,
            ph: None,
            organic_matter_percent: None,
            drainage: Some(Drainage::for_texture(texture)),
            assumed_start_fraction: None,
            provenance: SoilProvenance::Default,
        }
    }

    pub fn with_moisture(mut self, percentage: f64) -> Self {
        self.moisture_percentage = Some(percentage);
        self
    }

    pub fn is_measured(&self) -> bool {
        self.provenance == SoilProvenance::Measured
    }
}

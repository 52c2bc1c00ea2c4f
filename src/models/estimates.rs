use super::field::{CropKind, GrowthStage};
use serde::{Deserialize, Serialize};

/// Water demand for the current conditions. Recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EtEstimate {
    /// Reference evapotranspiration, mm/day
    pub et0: f64,
    /// Crop evapotranspiration, mm/day
    pub et_crop: f64,
    pub crop_coefficient: f64,
    pub crop: CropKind,
    pub stage: GrowthStage,
}

/// How the current moisture figure was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoistureBasis {
    Measured {
        moisture_percentage: f64,
    },
    /// Fixed figure standing in for a reading that could not be taken
    Assumed {
        moisture_percentage: f64,
    },
    Estimated {
        days_since_irrigation: i64,
        water_loss_mm: f64,
        water_gain_mm: f64,
        start_fraction: f64,
    },
}

impl MoistureBasis {
    pub fn is_measured(&self) -> bool {
        matches!(self, MoistureBasis::Measured { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoistureBasis::Measured { .. } => "measured",
            MoistureBasis::Assumed { .. } => "assumed",
            MoistureBasis::Estimated { .. } => "estimated",
        }
    }
}

/// Root-zone water state. `0 <= current_moisture_mm <= total_capacity_mm`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterBalance {
    pub current_moisture_mm: f64,
    pub total_capacity_mm: f64,
    /// Rounded percent of capacity, 0-100
    pub moisture_percentage: u8,
    pub is_critical: bool,
    pub is_optimal: bool,
    pub basis: MoistureBasis,
}

impl WaterBalance {
    /// Millimetres missing to reach `fraction` of capacity (never negative)
    pub fn deficit_to(&self, fraction: f64) -> f64 {
        (fraction * self.total_capacity_mm - self.current_moisture_mm).max(0.0)
    }
}

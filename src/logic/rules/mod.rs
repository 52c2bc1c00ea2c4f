pub mod critical_deficit;
pub mod engine;
pub mod moisture_deficit;
pub mod monitor;
pub mod optimal_moisture;
pub mod rain_expected;

pub use engine::DecisionEngine;

use crate::models::{EtEstimate, MoistureBasis, Recommendation, WaterBalance, WeatherSnapshot};

/// Forecast horizon the rules look at, days
pub const FORECAST_WINDOW_DAYS: usize = 3;

/// Expected rain at or above this makes irrigation pointless, mm
pub const HEAVY_RAIN_MM: f64 = 10.0;

/// Expected rain below this counts as "no help coming", mm
pub const LIGHT_RAIN_MM: f64 = 5.0;

/// Moisture (percent of capacity) below which irrigation is needed
pub const LOW_MOISTURE_PERCENT: u8 = 50;

/// Refill target for urgent irrigation, share of capacity
pub const URGENT_REFILL_FRACTION: f64 = 0.8;

/// Refill target for routine irrigation, share of capacity
pub const ROUTINE_REFILL_FRACTION: f64 = 0.7;

/// Litres per (mm of deficit × hectare). Unverified heuristic; the physical
/// conversion would be 10 000.
pub const LITERS_PER_MM_HECTARE: f64 = 10.0;

/// Inputs every rule sees
pub struct DecisionContext<'a> {
    pub balance: &'a WaterBalance,
    pub weather: &'a WeatherSnapshot,
    pub et: &'a EtEstimate,
    pub field_size_hectares: f64,
    pub rain_next_days_mm: f64,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        balance: &'a WaterBalance,
        weather: &'a WeatherSnapshot,
        et: &'a EtEstimate,
        field_size_hectares: f64,
    ) -> Self {
        Self {
            balance,
            weather,
            et,
            field_size_hectares,
            rain_next_days_mm: weather.precipitation_next_days(FORECAST_WINDOW_DAYS),
        }
    }

    /// Where the moisture figure came from, for data-point attribution
    pub fn moisture_source(&self) -> &'static str {
        match self.balance.basis {
            MoistureBasis::Measured { .. } => "Soil sensor",
            MoistureBasis::Assumed { .. } => "Soil texture default",
            MoistureBasis::Estimated { .. } => "Water balance model",
        }
    }
}

/// One step of the irrigation decision procedure
pub trait DecisionRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Return a recommendation if this rule's conditions hold
    fn evaluate(&self, ctx: &DecisionContext) -> Option<Recommendation>;
}

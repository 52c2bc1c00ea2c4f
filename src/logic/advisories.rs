use super::calculations::round_to;
use crate::config::AdvisoryConfig;
use crate::models::{
    Advisories, CostEstimate, CurrentConditions, EnvironmentalImpact, IrrigationStatus,
    OptimalWindows, Recommendation, Sustainability, TimeWindow, WaterEfficiency, WindowChoice,
};
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_WATER_COST_PER_LITER: f64 = 0.002;
pub const DEFAULT_ENERGY_COST_PER_LITER: f64 = 0.001;
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_CO2_KG_PER_LITER: f64 = 0.0003;

/// Above this the evening slot moves earlier, °C
const HOT_EVENING_TEMP_C: f64 = 30.0;
/// Above this the morning slot is preferred, °C
const MORNING_PREFERENCE_TEMP_C: f64 = 25.0;
/// Above this sprinkler drift becomes a concern, km/h
const DRIFT_WIND_KMH: f64 = 15.0;

pub const URGENT_REASSESS_HOURS: i64 = 6;
pub const NEEDED_REASSESS_HOURS: i64 = 24;
pub const SKIP_REASSESS_HOURS: i64 = 72;
pub const DEFAULT_REASSESS_HOURS: i64 = 48;

pub fn optimal_windows(current: &CurrentConditions) -> OptimalWindows {
    let morning = TimeWindow::new("05:00", "08:00", "Cool air and calm wind, lowest evaporation");

    let evening = if current.temperature_c > HOT_EVENING_TEMP_C {
        TimeWindow::new("17:00", "19:00", "Water before dusk so foliage dries in the heat")
    } else {
        TimeWindow::new("18:00", "20:00", "Evaporation drops after sunset")
    };

    let avoid = TimeWindow::new("11:00", "15:00", "Peak sun, most water lost to evaporation");

    let best = if current.temperature_c > MORNING_PREFERENCE_TEMP_C {
        WindowChoice::Morning
    } else {
        WindowChoice::Evening
    };

    OptimalWindows {
        morning,
        evening,
        avoid,
        best,
    }
}

pub fn conservation_tips(current: &CurrentConditions, status: IrrigationStatus) -> Vec<String> {
    let mut tips = vec![
        "Mulch around plants to cut surface evaporation.".to_string(),
        "Use drip or furrow irrigation to put water at the root zone.".to_string(),
    ];

    if current.wind_speed_kmh > DRIFT_WIND_KMH {
        tips.push(
            "Wind is strong: avoid sprinklers or wait for calmer conditions to reduce drift."
                .to_string(),
        );
    }

    if status == IrrigationStatus::Urgent {
        tips.push(
            "Split the application into two sessions so the soil can absorb it without runoff."
                .to_string(),
        );
    }

    tips
}

pub fn reassess_after(status: IrrigationStatus) -> Duration {
    let hours = match status {
        IrrigationStatus::Urgent => URGENT_REASSESS_HOURS,
        IrrigationStatus::Needed => NEEDED_REASSESS_HOURS,
        IrrigationStatus::Skip => SKIP_REASSESS_HOURS,
        IrrigationStatus::Optimal | IrrigationStatus::Monitor => DEFAULT_REASSESS_HOURS,
    };
    Duration::hours(hours)
}

pub fn next_assessment(status: IrrigationStatus, now: DateTime<Utc>) -> DateTime<Utc> {
    now + reassess_after(status)
}

pub fn cost_estimate(amount_liters: u64, config: &AdvisoryConfig) -> CostEstimate {
    let amount = amount_liters as f64;
    let water = round_to(amount * config.water_cost_per_liter, 2);
    let energy = round_to(amount * config.energy_cost_per_liter, 2);

    CostEstimate {
        water,
        energy,
        total: round_to(water + energy, 2),
        currency: config.currency.clone(),
    }
}

pub fn environmental_impact(
    amount_liters: u64,
    status: IrrigationStatus,
    config: &AdvisoryConfig,
) -> EnvironmentalImpact {
    let sustainability = match status {
        IrrigationStatus::Optimal | IrrigationStatus::Skip => Sustainability::Excellent,
        IrrigationStatus::Monitor => Sustainability::Good,
        IrrigationStatus::Needed => Sustainability::Moderate,
        IrrigationStatus::Urgent => Sustainability::Concerning,
    };

    let water_efficiency = if status == IrrigationStatus::Urgent {
        WaterEfficiency::Low
    } else {
        WaterEfficiency::High
    };

    EnvironmentalImpact {
        co2_kg: round_to(amount_liters as f64 * config.co2_kg_per_liter, 3),
        sustainability,
        water_efficiency,
    }
}

pub fn build_advisories(
    recommendation: &Recommendation,
    current: &CurrentConditions,
    config: &AdvisoryConfig,
    now: DateTime<Utc>,
) -> Advisories {
    Advisories {
        optimal_windows: optimal_windows(current),
        conservation_tips: conservation_tips(current, recommendation.status),
        next_assessment: next_assessment(recommendation.status, now),
        cost: cost_estimate(recommendation.amount_liters, config),
        environmental_impact: environmental_impact(
            recommendation.amount_liters,
            recommendation.status,
            config,
        ),
    }
}

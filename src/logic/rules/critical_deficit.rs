use super::{
    DecisionContext, DecisionRule, FORECAST_WINDOW_DAYS, HEAVY_RAIN_MM, LITERS_PER_MM_HECTARE,
    URGENT_REFILL_FRACTION,
};
use crate::logic::calculations::whole_liters;
use crate::models::{IrrigationAction, IrrigationStatus, Priority, Recommendation, Timing};

/// Critical deficit rule - soil is nearly dry and rain won't arrive in time
///
/// Conditions:
/// - Moisture below the critical share of capacity
/// - Less than 10mm of rain expected over the next 3 days
///
/// Refills the root zone to 80% of capacity.
pub struct CriticalDeficitRule;

impl DecisionRule for CriticalDeficitRule {
    fn id(&self) -> &'static str {
        "critical_deficit"
    }

    fn name(&self) -> &'static str {
        "Critical Soil Moisture Deficit"
    }

    fn evaluate(&self, ctx: &DecisionContext) -> Option<Recommendation> {
        if !ctx.balance.is_critical || ctx.rain_next_days_mm >= HEAVY_RAIN_MM {
            return None;
        }

        let deficit_mm = ctx.balance.deficit_to(URGENT_REFILL_FRACTION);
        let liters = whole_liters(deficit_mm * ctx.field_size_hectares * LITERS_PER_MM_HECTARE);

        let mut rec = Recommendation::new(
            IrrigationStatus::Urgent,
            Priority::High,
            IrrigationAction::IrrigateNow,
            Timing::Within2Hours,
            "Soil moisture is critically low and little rain is expected in the next 3 days. \
             Irrigate immediately to prevent crop water stress.",
        )
        .with_amount(liters)
        .with_data_point(
            "Soil Moisture",
            format!("{}%", ctx.balance.moisture_percentage),
            ctx.moisture_source(),
        )
        .with_data_point(
            "Expected Rain (3 days)",
            format!("{:.1} mm", ctx.rain_next_days_mm),
            "Weather forecast",
        )
        .with_data_point(
            "Crop Water Use",
            format!("{:.2} mm/day", ctx.et.et_crop),
            "ET estimate",
        );

        if let Some(high) = ctx.weather.max_temp_next_days(FORECAST_WINDOW_DAYS) {
            rec = rec.with_data_point(
                "Forecast High",
                format!("{:.0}°C", high),
                "Weather forecast",
            );
        }

        Some(rec)
    }
}

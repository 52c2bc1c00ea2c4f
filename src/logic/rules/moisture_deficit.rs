use super::{
    DecisionContext, DecisionRule, LIGHT_RAIN_MM, LITERS_PER_MM_HECTARE, LOW_MOISTURE_PERCENT,
    ROUTINE_REFILL_FRACTION,
};
use crate::logic::calculations::whole_liters;
use crate::models::{IrrigationAction, IrrigationStatus, Priority, Recommendation, Timing};

/// Moisture deficit rule - soil is below half of capacity with a dry outlook
///
/// Conditions:
/// - Moisture below 50% of capacity
/// - Less than 5mm of rain expected over the next 3 days
///
/// Refills the root zone to 70% of capacity.
pub struct MoistureDeficitRule;

impl DecisionRule for MoistureDeficitRule {
    fn id(&self) -> &'static str {
        "moisture_deficit"
    }

    fn name(&self) -> &'static str {
        "Soil Moisture Deficit"
    }

    fn evaluate(&self, ctx: &DecisionContext) -> Option<Recommendation> {
        if ctx.balance.moisture_percentage >= LOW_MOISTURE_PERCENT
            || ctx.rain_next_days_mm >= LIGHT_RAIN_MM
        {
            return None;
        }

        let deficit_mm = ctx.balance.deficit_to(ROUTINE_REFILL_FRACTION);
        let liters = whole_liters(deficit_mm * ctx.field_size_hectares * LITERS_PER_MM_HECTARE);

        Some(
            Recommendation::new(
                IrrigationStatus::Needed,
                Priority::Medium,
                IrrigationAction::IrrigateSoon,
                Timing::Within24Hours,
                "Soil moisture has dropped below half of capacity and minimal rain is forecast. \
                 Plan to irrigate within the next day.",
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
            ),
        )
    }
}

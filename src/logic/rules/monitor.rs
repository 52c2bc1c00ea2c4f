use super::{DecisionContext, DecisionRule};
use crate::models::{IrrigationAction, IrrigationStatus, Priority, Recommendation, Timing};

/// Fallback rule - nothing urgent, nothing optimal; look again tomorrow.
/// Always matches, so it must be last.
pub struct MonitorRule;

impl DecisionRule for MonitorRule {
    fn id(&self) -> &'static str {
        "monitor"
    }

    fn name(&self) -> &'static str {
        "Monitor Conditions"
    }

    fn evaluate(&self, ctx: &DecisionContext) -> Option<Recommendation> {
        Some(self.build_recommendation(ctx))
    }
}

impl MonitorRule {
    pub fn build_recommendation(&self, ctx: &DecisionContext) -> Recommendation {
        Recommendation::new(
            IrrigationStatus::Monitor,
            Priority::Low,
            IrrigationAction::AssessTomorrow,
            Timing::Tomorrow,
            "Soil moisture is adequate for now. Reassess conditions tomorrow.",
        )
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
    }
}

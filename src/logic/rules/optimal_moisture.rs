use super::{DecisionContext, DecisionRule};
use crate::models::{IrrigationAction, IrrigationStatus, Priority, Recommendation, Timing};

/// Optimal moisture rule - root zone is at or above 70% of capacity
pub struct OptimalMoistureRule;

impl DecisionRule for OptimalMoistureRule {
    fn id(&self) -> &'static str {
        "optimal_moisture"
    }

    fn name(&self) -> &'static str {
        "Optimal Soil Moisture"
    }

    fn evaluate(&self, ctx: &DecisionContext) -> Option<Recommendation> {
        if !ctx.balance.is_optimal {
            return None;
        }

        Some(
            Recommendation::new(
                IrrigationStatus::Optimal,
                Priority::Low,
                IrrigationAction::Monitor,
                Timing::NextAssessment,
                "Soil moisture is at an optimal level. No irrigation is needed right now.",
            )
            .with_data_point(
                "Soil Moisture",
                format!("{}%", ctx.balance.moisture_percentage),
                ctx.moisture_source(),
            ),
        )
    }
}

use super::{DecisionContext, DecisionRule, HEAVY_RAIN_MM};
use crate::models::{IrrigationAction, IrrigationStatus, Priority, Recommendation, Timing};

/// Rain expected rule - enough rain is coming that irrigating would waste water
///
/// Conditions:
/// - 10mm or more of rain expected over the next 3 days
pub struct RainExpectedRule;

impl DecisionRule for RainExpectedRule {
    fn id(&self) -> &'static str {
        "rain_expected"
    }

    fn name(&self) -> &'static str {
        "Significant Rain Expected"
    }

    fn evaluate(&self, ctx: &DecisionContext) -> Option<Recommendation> {
        if ctx.rain_next_days_mm < HEAVY_RAIN_MM {
            return None;
        }

        let reason = format!(
            "About {:.0}mm of rain is expected in the next 3 days. \
             Skip irrigation and let the rainfall replenish the soil.",
            ctx.rain_next_days_mm.round()
        );

        let wettest_day = ctx
            .weather
            .forecast
            .iter()
            .take(super::FORECAST_WINDOW_DAYS)
            .max_by(|a, b| {
                a.precipitation_mm
                    .partial_cmp(&b.precipitation_mm)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let mut rec = Recommendation::new(
            IrrigationStatus::Skip,
            Priority::Low,
            IrrigationAction::WaitForRain,
            Timing::AfterRainfall,
            reason,
        )
        .with_data_point(
            "Expected Rain (3 days)",
            format!("{:.1} mm", ctx.rain_next_days_mm),
            "Weather forecast",
        );

        if let Some(day) = wettest_day {
            rec = rec.with_data_point(
                "Wettest Day",
                format!(
                    "{} ({:.1} mm, {:.0}%)",
                    day.date,
                    day.precipitation_mm,
                    day.precipitation_probability * 100.0
                ),
                "Weather forecast",
            );
        }

        Some(rec)
    }
}

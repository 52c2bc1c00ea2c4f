use super::{
    critical_deficit::CriticalDeficitRule, moisture_deficit::MoistureDeficitRule,
    monitor::MonitorRule, optimal_moisture::OptimalMoistureRule, rain_expected::RainExpectedRule,
    DecisionContext, DecisionRule,
};
use crate::models::{EtEstimate, Recommendation, WaterBalance, WeatherSnapshot};

/// Ordered decision procedure. The first rule that matches wins, so the
/// order of `rules` is the tie-break policy.
pub struct DecisionEngine {
    rules: Vec<Box<dyn DecisionRule>>,
}

impl DecisionEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn DecisionRule>> = vec![
            Box::new(CriticalDeficitRule),
            Box::new(MoistureDeficitRule),
            Box::new(RainExpectedRule),
            Box::new(OptimalMoistureRule),
            Box::new(MonitorRule),
        ];

        Self { rules }
    }

    pub fn decide(
        &self,
        balance: &WaterBalance,
        weather: &WeatherSnapshot,
        et: &EtEstimate,
        field_size_hectares: f64,
    ) -> Recommendation {
        let ctx = DecisionContext::new(balance, weather, et, field_size_hectares);
        self.evaluate(&ctx)
    }

    pub fn evaluate(&self, ctx: &DecisionContext) -> Recommendation {
        self.rules
            .iter()
            .find_map(|rule| {
                let rec = rule.evaluate(ctx)?;
                tracing::debug!("Decision rule '{}' ({}) matched", rule.name(), rule.id());
                Some(rec)
            })
            .unwrap_or_else(|| MonitorRule.build_recommendation(ctx))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

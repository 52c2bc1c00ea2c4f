use super::estimates::{EtEstimate, WaterBalance};
use super::request::RecommendationRequest;
use super::soil::SoilSnapshot;
use super::weather::{AirQualitySnapshot, WeatherSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationStatus {
    Urgent,
    Needed,
    Skip,
    Optimal,
    Monitor,
}

impl IrrigationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationStatus::Urgent => "urgent",
            IrrigationStatus::Needed => "needed",
            IrrigationStatus::Skip => "skip",
            IrrigationStatus::Optimal => "optimal",
            IrrigationStatus::Monitor => "monitor",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            IrrigationStatus::Urgent => "!",
            IrrigationStatus::Needed => "⚠",
            IrrigationStatus::Skip => "🌧",
            IrrigationStatus::Optimal => "✓",
            IrrigationStatus::Monitor => "→",
        }
    }
}

impl std::fmt::Display for IrrigationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationAction {
    IrrigateNow,
    IrrigateSoon,
    WaitForRain,
    Monitor,
    AssessTomorrow,
}

impl IrrigationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationAction::IrrigateNow => "irrigate_now",
            IrrigationAction::IrrigateSoon => "irrigate_soon",
            IrrigationAction::WaitForRain => "wait_for_rain",
            IrrigationAction::Monitor => "monitor",
            IrrigationAction::AssessTomorrow => "assess_tomorrow",
        }
    }
}

impl std::fmt::Display for IrrigationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timing {
    #[serde(rename = "within_2_hours")]
    Within2Hours,
    #[serde(rename = "within_24_hours")]
    Within24Hours,
    AfterRainfall,
    NextAssessment,
    Tomorrow,
}

impl Timing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timing::Within2Hours => "within_2_hours",
            Timing::Within24Hours => "within_24_hours",
            Timing::AfterRainfall => "after_rainfall",
            Timing::NextAssessment => "next_assessment",
            Timing::Tomorrow => "tomorrow",
        }
    }
}

impl std::fmt::Display for Timing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherAvailability {
    Real,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilAvailability {
    Real,
    Limited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    High,
    Limited,
}

impl Reliability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reliability::High => "high",
            Reliability::Limited => "limited",
        }
    }
}

impl std::fmt::Display for Reliability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceInfo {
    pub weather: WeatherAvailability,
    pub soil: SoilAvailability,
    pub reliability: Reliability,
}

impl Default for DataSourceInfo {
    fn default() -> Self {
        Self {
            weather: WeatherAvailability::Real,
            soil: SoilAvailability::Real,
            reliability: Reliability::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: String,
    pub source: String,
}

impl DataPoint {
    pub fn new(label: &str, value: impl std::fmt::Display, source: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            source: source.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub status: IrrigationStatus,
    pub priority: Priority,
    pub action: IrrigationAction,
    pub amount_liters: u64,
    pub timing: Timing,
    pub reason: String,
    pub data_points: Vec<DataPoint>,
    pub data_source: DataSourceInfo,
}

impl Recommendation {
    pub fn new(
        status: IrrigationStatus,
        priority: Priority,
        action: IrrigationAction,
        timing: Timing,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            status,
            priority,
            action,
            amount_liters: 0,
            timing,
            reason: reason.into(),
            data_points: Vec::new(),
            data_source: DataSourceInfo::default(),
        }
    }

    pub fn with_amount(mut self, liters: u64) -> Self {
        self.amount_liters = liters;
        self
    }

    pub fn with_data_point(
        mut self,
        label: &str,
        value: impl std::fmt::Display,
        source: &str,
    ) -> Self {
        self.data_points.push(DataPoint::new(label, value, source));
        self
    }

    pub fn with_data_source(mut self, data_source: DataSourceInfo) -> Self {
        self.data_source = data_source;
        self
    }

    pub fn requires_irrigation(&self) -> bool {
        self.amount_liters > 0
    }
}

/// A time-of-day slot shown to the farmer, e.g. "05:00"-"08:00"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
    pub note: String,
}

impl TimeWindow {
    pub fn new(start: &str, end: &str, note: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            note: note.to_string(),
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowChoice {
    Morning,
    Evening,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalWindows {
    pub morning: TimeWindow,
    pub evening: TimeWindow,
    pub avoid: TimeWindow,
    pub best: WindowChoice,
}

impl OptimalWindows {
    pub fn best_window(&self) -> &TimeWindow {
        match self.best {
            WindowChoice::Morning => &self.morning,
            WindowChoice::Evening => &self.evening,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub water: f64,
    pub energy: f64,
    pub total: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sustainability {
    Excellent,
    Good,
    Moderate,
    Concerning,
}

impl Sustainability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sustainability::Excellent => "excellent",
            Sustainability::Good => "good",
            Sustainability::Moderate => "moderate",
            Sustainability::Concerning => "concerning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterEfficiency {
    Low,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    pub co2_kg: f64,
    pub sustainability: Sustainability,
    pub water_efficiency: WaterEfficiency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisories {
    pub optimal_windows: OptimalWindows,
    pub conservation_tips: Vec<String>,
    pub next_assessment: DateTime<Utc>,
    pub cost: CostEstimate,
    pub environmental_impact: EnvironmentalImpact,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataAvailability {
    pub weather: bool,
    pub soil: bool,
    pub air_quality: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub generated_at: DateTime<Utc>,
    pub data_availability: DataAvailability,
    pub warnings: Vec<String>,
    pub reliability: Reliability,
}

/// Everything one advisory request produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub request: RecommendationRequest,
    pub recommendation: Recommendation,
    pub water_balance: WaterBalance,
    pub et_estimate: EtEstimate,
    pub weather: WeatherSnapshot,
    pub soil: SoilSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_quality: Option<AirQualitySnapshot>,
    pub advisories: Advisories,
    pub metadata: ResultMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_builder() {
        let rec = Recommendation::new(
            IrrigationStatus::Needed,
            Priority::Medium,
            IrrigationAction::IrrigateSoon,
            Timing::Within24Hours,
            "Soil is drying out",
        )
        .with_amount(1200)
        .with_data_point("Soil Moisture", "42%", "Open-Meteo");

        assert!(rec.requires_irrigation());
        assert_eq!(rec.data_points.len(), 1);
        assert_eq!(rec.data_source, DataSourceInfo::default());
    }

    #[test]
    fn enum_tags_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&IrrigationAction::IrrigateNow).unwrap(),
            "\"irrigate_now\""
        );
        assert_eq!(
            serde_json::to_string(&Timing::Within2Hours).unwrap(),
            "\"within_2_hours\""
        );
        assert_eq!(
            serde_json::to_string(&SoilAvailability::Limited).unwrap(),
            "\"limited\""
        );
        assert_eq!(Timing::Within24Hours.as_str(), "within_24_hours");
    }

    #[test]
    fn priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }
}

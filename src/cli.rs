use crate::models::{Coordinates, GrowthStage, RecommendationRequest, SoilTexture};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "irrigo", version, about = "Irrigation advice from public weather and soil data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an irrigation recommendation for one field
    Recommend(RecommendArgs),
    /// Validate config and test connections
    Check(LocationArgs),
    /// Re-run interactive setup
    Init,
}

#[derive(Args, Debug, Clone)]
pub struct LocationArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    pub lon: f64,
}

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Crop name, e.g. "tomatoes" or "maize"
    #[arg(long)]
    pub crop: String,

    /// Growth stage: initial, development, mid, late
    #[arg(long, default_value = "mid")]
    pub stage: String,

    /// Soil texture, e.g. "loam" or "sandy loam"
    #[arg(long)]
    pub soil: Option<String>,

    /// Field size in hectares
    #[arg(long)]
    pub field_size: f64,

    /// Date of the last irrigation (YYYY-MM-DD)
    #[arg(long)]
    pub last_irrigation: Option<NaiveDate>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

impl RecommendArgs {
    pub fn to_request(&self) -> RecommendationRequest {
        let stage = GrowthStage::parse_or_mid(&self.stage);
        let mut request = RecommendationRequest::new(
            Coordinates::new(self.lat, self.lon),
            self.crop.clone(),
            stage,
            self.field_size,
        );

        if let Some(ref soil) = self.soil {
            request = request.with_soil_type(SoilTexture::from_str(soil));
        }
        if let Some(date) = self.last_irrigation {
            request = request.with_last_irrigation(date);
        }

        request
    }
}

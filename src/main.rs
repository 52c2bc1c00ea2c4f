mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, LocationArgs, RecommendArgs};
use config::Config;
use datasources::EnvironmentalClient;
use logic::RecommendationService;
use models::{Coordinates, RecommendationResult};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Init => {
            Config::setup_interactive().context("setup failed")?;
        }
        Commands::Check(ref args) => run_check(cli.config.clone(), args).await?,
        Commands::Recommend(ref args) => run_recommend(cli.config.clone(), args).await?,
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    if !Config::exists(path.as_ref()) {
        anyhow::bail!(
            "No configuration found. Run `irrigo init` or copy \
             config/config.yaml.example to config/config.yaml"
        );
    }
    Ok(Config::load(path)?)
}

async fn run_check(config_path: Option<PathBuf>, args: &LocationArgs) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    println!("Configuration OK");

    let client = EnvironmentalClient::new(&config);
    let status = client
        .check_connections(Coordinates::new(args.lat, args.lon))
        .await;

    let label = |ok: bool| if ok { "OK" } else { "OFFLINE" };
    println!("OpenWeatherMap: {}", label(status.openweathermap));
    println!("Open-Meteo:     {}", label(status.open_meteo));

    if !status.can_recommend() {
        anyhow::bail!("weather provider unreachable; recommendations are not possible");
    }
    if !status.all_connected() {
        println!("Soil provider offline: recommendations will run with limited reliability");
    }

    Ok(())
}

async fn run_recommend(config_path: Option<PathBuf>, args: &RecommendArgs) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let request = args.to_request();

    let service = RecommendationService::new(
        EnvironmentalClient::new(&config),
        config.advisory.clone(),
    );

    let result = service
        .build_recommendation(&request)
        .await
        .with_context(|| format!("no recommendation for {}", request.coordinates))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(())
}

fn print_report(result: &RecommendationResult) {
    let rec = &result.recommendation;
    let balance = &result.water_balance;
    let et = &result.et_estimate;
    let advisories = &result.advisories;

    println!(
        "{} {} ({} priority)",
        rec.status.symbol(),
        rec.status.as_str().to_uppercase(),
        rec.priority
    );
    println!("  {}", rec.reason);
    println!("  Action: {}  Timing: {}", rec.action, rec.timing);
    if rec.requires_irrigation() {
        println!("  Amount: {} L", rec.amount_liters);
    }
    println!();

    println!(
        "Soil moisture: {}% ({:.1} of {:.1} mm, {})",
        balance.moisture_percentage,
        balance.current_moisture_mm,
        balance.total_capacity_mm,
        balance.basis.label()
    );
    if !balance.basis.is_measured() {
        println!("  No soil moisture reading was used; treat the figure as a guide");
    }
    match result.soil.drainage {
        Some(drainage) => println!(
            "Soil: {}, {} drainage",
            result.soil.texture,
            drainage.as_str()
        ),
        None => println!("Soil: {}", result.soil.texture),
    }
    println!(
        "ET0 {:.2} mm/day, crop ET {:.2} mm/day (Kc {:.2}, {} / {})",
        et.et0, et.et_crop, et.crop_coefficient, et.crop, et.stage
    );
    if let Some(ref aq) = result.air_quality {
        println!("Air quality: {} (AQI {})", aq.label(), aq.aqi);
    }
    for point in &rec.data_points {
        println!("  {}: {} [{}]", point.label, point.value, point.source);
    }
    println!();

    let best = advisories.optimal_windows.best_window();
    println!("Best window: {}-{} ({})", best.start, best.end, best.note);
    let avoid = &advisories.optimal_windows.avoid;
    println!("Avoid: {}-{}", avoid.start, avoid.end);
    for tip in &advisories.conservation_tips {
        println!("  - {}", tip);
    }
    println!(
        "Cost: {:.2} {} (water {:.2}, energy {:.2})",
        advisories.cost.total,
        advisories.cost.currency,
        advisories.cost.water,
        advisories.cost.energy
    );
    println!(
        "Footprint: {:.3} kg CO2, sustainability {}",
        advisories.environmental_impact.co2_kg,
        advisories.environmental_impact.sustainability.as_str()
    );
    println!(
        "Next assessment: {}",
        advisories.next_assessment.format("%Y-%m-%d %H:%M UTC")
    );
    println!();

    println!("Reliability: {}", result.metadata.reliability);
    for warning in &result.metadata.warnings {
        println!("  ! {}", warning);
    }
}

use std::path::Path;
use std::process::ExitCode;

use airintel::models::config::AirIntelConfig;
use airintel::models::TradeRecord;
use airintel::query::{handle, IntelligenceQuery};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "airintel", about = "Air-shipper intelligence for trade-shipment records")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/airintel.toml")]
    config: String,

    /// Company to evaluate
    #[arg(long)]
    company: Option<String>,

    /// Origin country of the shipment
    #[arg(long)]
    country: Option<String>,

    /// HS commodity code of the shipment
    #[arg(long)]
    hs_code: Option<String>,

    /// JSON file with prior ocean shipments (array of trade records)
    #[arg(long)]
    prior: Option<String>,

    /// Freight modality filter: air, ocean or all
    #[arg(long)]
    mode: Option<String>,

    /// Return null intelligence unless the company is a likely air shipper
    #[arg(long)]
    air_shipper_only: bool,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,
}

fn load_config(path: &str) -> Result<AirIntelConfig> {
    if !Path::new(path).exists() {
        tracing::warn!(path, "Config file not found, using defaults");
        return Ok(AirIntelConfig::default());
    }
    let config_str =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read config: {path}"))?;
    toml::from_str(&config_str).with_context(|| "Failed to parse config")
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let prior_ocean_shipments = match &cli.prior {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read prior shipments: {path}"))?;
            let records: Vec<TradeRecord> =
                serde_json::from_str(&json).context("Failed to parse prior shipments JSON")?;
            Some(records)
        }
        None => None,
    };

    let engine = airintel::build_engine(&config);
    let outcome = handle(
        &engine,
        IntelligenceQuery {
            company: cli.company,
            mode: cli.mode,
            air_shipper_only: cli.air_shipper_only,
            country: cli.country,
            hs_code: cli.hs_code,
            prior_ocean_shipments,
        },
    )
    .await;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&outcome.body)?
    } else {
        serde_json::to_string(&outcome.body)?
    };
    println!("{output}");

    Ok(match outcome.status {
        200 => ExitCode::SUCCESS,
        400 => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    })
}

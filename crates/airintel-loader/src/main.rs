use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use airintel_loader::config::LoaderConfig;
use airintel_loader::writer::SqliteWriter;

#[derive(Parser, Debug)]
#[command(
    name = "airintel-loader",
    about = "Loads T-100, Census, Comtrade and company profile data into the airintel reference database"
)]
struct Cli {
    /// Path to loader configuration file
    #[arg(short, long, default_value = "config/airintel-loader.toml")]
    config: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("Failed to read config: {}", cli.config))?;
    let config: LoaderConfig =
        toml::from_str(&config_str).with_context(|| "Failed to parse loader config")?;

    let mut writer = SqliteWriter::open(&config.store.sqlite_path)
        .with_context(|| format!("Failed to open reference DB: {}", config.store.sqlite_path))?;

    let reports = airintel_loader::run(&config, &mut writer).context("Load failed")?;

    println!("{}", serde_json::to_string(&reports)?);
    tracing::info!(
        routes = writer.route_count()?,
        profiles = writer.profile_count()?,
        trade_records = writer.trade_record_count()?,
        "Reference database updated"
    );

    Ok(())
}

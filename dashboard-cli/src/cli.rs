use clap::{Parser, Subcommand};
use dashboard_core::{Archiver, Config, FileConfig, OpenWeatherClient, S3Store};

use crate::session;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and bucket name in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => run_dashboard().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut file = FileConfig::load()?;

    let api_key = inquire::Text::new("OpenWeather API key:").prompt()?;
    let bucket = inquire::Text::new("S3 bucket name:").prompt()?;

    // Blank answers keep whatever was configured before.
    if !api_key.trim().is_empty() {
        file.api_key = Some(api_key.trim().to_string());
    }
    if !bucket.trim().is_empty() {
        file.bucket = Some(bucket.trim().to_string());
    }

    file.save()?;
    println!(
        "Saved configuration to {}",
        FileConfig::config_file_path()?.display()
    );

    Ok(())
}

async fn run_dashboard() -> anyhow::Result<()> {
    let config = Config::resolve()?;

    let fetcher = OpenWeatherClient::new(config.api_key.clone());
    let store = S3Store::from_env(&config.region).await;
    let archiver = Archiver::new(
        Box::new(store),
        config.bucket.clone(),
        config.region.clone(),
    );

    session::run(&fetcher, &archiver, config.pause()).await;

    Ok(())
}

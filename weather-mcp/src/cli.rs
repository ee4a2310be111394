use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use rmcp::ServiceExt;
use tracing::{info, warn};
use weather_core::{Config, OpenWeatherProvider, WeatherLookup};

use crate::server::WeatherStation;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-mcp", version, about = "Current weather as an MCP tool")]
pub struct Cli {
    /// Read settings from this file instead of the platform config dir.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `serve` so MCP hosts can launch the binary without arguments.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the `get_weather` tool over MCP stdio.
    Serve,

    /// Look up the current weather once and print it.
    Show {
        /// City name, e.g. "Beijing".
        city: String,
    },

    /// Store an OpenWeatherMap API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Cli { config, command } = self;

        match command.unwrap_or(Command::Serve) {
            Command::Serve => serve(load_config(config.as_ref())?).await,
            Command::Show { city } => {
                let lookup = build_lookup(&load_config(config.as_ref())?)?;
                println!("{}", lookup.lookup(&city).await);
                Ok(())
            }
            Command::Configure => configure(config),
        }
    }
}

/// File settings with `OPENWEATHER_API_KEY` layered on top.
fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let cfg = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(cfg.with_env())
}

fn build_lookup(config: &Config) -> Result<WeatherLookup> {
    if config.api_key().is_none() {
        warn!("OPENWEATHER_API_KEY is not set; get_weather will report a configuration error");
    }

    let provider = OpenWeatherProvider::new(config.provider_settings())?;
    Ok(WeatherLookup::new(Arc::new(provider)))
}

async fn serve(config: Config) -> Result<()> {
    let station = WeatherStation::new(build_lookup(&config)?);

    info!("Starting WeatherStation MCP server on stdio");
    let service = station
        .serve(rmcp::transport::stdio())
        .await
        .context("Failed to start MCP server on stdio")?;

    let reason = service.waiting().await?;
    info!(?reason, "WeatherStation MCP server stopped");
    Ok(())
}

fn configure(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::config_file_path()?,
    };
    // The environment key is not persisted.
    let cfg = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    cfg.with_api_key(Some(api_key.trim().to_string())).save_to(&path)?;
    println!("Saved API key to {}", path.display());
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use inquire::{Password, PasswordDisplayMode};
use tracing::{debug, info};
use weather_core::{Config, Units, WeatherProvider, WeatherQuery, provider_from_config};

use crate::report::{self, Palette};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Gets weather and temperature information")]
pub struct Cli {
    /// City name, one or more words.
    #[arg(required_unless_present = "configure", num_args = 1..)]
    pub city: Vec<String>,

    /// Display the temperature in imperial units.
    #[arg(short, long)]
    pub imperial: bool,

    /// Config file holding the [OpenWeather] api_key.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log request details to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Prompt for an OpenWeather API key, save it, and exit.
    #[arg(long, conflicts_with = "city")]
    pub configure: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = Config::resolve_path(self.config.as_deref())?;

        if self.configure {
            return configure(&path);
        }

        let config = Config::load_from(&path)?;
        debug!(path = %path.display(), "loaded config");

        let provider = provider_from_config(&config)?;
        let report = self.report(&config, provider.as_ref()).await?;

        println!("{report}");

        Ok(())
    }

    /// Query `provider` for the requested city and render the result.
    async fn report(&self, config: &Config, provider: &dyn WeatherProvider) -> anyhow::Result<String> {
        let units = Units::from_imperial_flag(self.imperial);
        let query = WeatherQuery::new(self.city.as_slice(), units, config.api_key()?)?;

        let weather = provider.current_weather(&query).await?;

        Ok(report::render(&weather, units, &Palette::STANDARD))
    }
}

/// Interactive key entry; keeps anything else already in the file.
fn configure(path: &Path) -> anyhow::Result<()> {
    let mut config = if path.exists() {
        Config::load_from(path)?
    } else {
        Config::default()
    };

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty.");
    }

    config.set_api_key(api_key.to_string());
    config.save_to(path)?;

    info!(path = %path.display(), "saved API key");
    println!("Saved API key to {}", path.display());

    Ok(())
}

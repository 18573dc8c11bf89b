use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, SpeedLevel};
use grid_snake::modes::HumanMode;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid (overrides the config file)
    #[arg(long)]
    grid_size: Option<usize>,

    /// Starting speed (overrides the config file)
    #[arg(long)]
    speed: Option<Speed>,

    /// Append logs to this file; `RUST_LOG` controls verbosity
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Speed {
    Slow,
    Medium,
    Fast,
}

impl From<Speed> for SpeedLevel {
    fn from(speed: Speed) -> Self {
        match speed {
            Speed::Slow => SpeedLevel::Slow,
            Speed::Medium => SpeedLevel::Medium,
            Speed::Fast => SpeedLevel::Fast,
        }
    }
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };

    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(speed) = cli.speed {
        config.initial_speed = speed.into();
    }

    config.validate().context("Invalid game settings")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    grid_snake::logging::init(cli.log_file.as_deref())?;

    let config = build_config(&cli)?;
    info!(
        grid_size = config.grid_size,
        speed = config.initial_speed.as_str(),
        "starting"
    );

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}

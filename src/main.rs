use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use snake_engine::game::EngineConfig;
use snake_engine::modes::HumanMode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "snake_engine")]
#[command(version, about = "Terminal frontend for the snake engine")]
struct Cli {
    /// JSON engine configuration; other flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Wrap around at the edges instead of ending the game
    #[arg(long)]
    loop_at_edge: bool,

    /// Let the snake pass through itself
    #[arg(long)]
    no_self_collision: bool,

    /// Food items on the grid after each reset
    #[arg(long)]
    food: Option<usize>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between snake moves
    #[arg(long, default_value = "100")]
    tick_ms: u64,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::new(30, 20),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if self.loop_at_edge {
            config.loop_at_edge = true;
        }
        if self.no_self_collision {
            config.collide_with_snake = false;
        }
        if let Some(food) = self.food {
            config.initial_food = food;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid engine configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "snake_engine=info".into()),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.engine_config()?;
    let mut human_mode = HumanMode::new(config, Duration::from_millis(cli.tick_ms.max(1)))?;
    human_mode.run().await?;

    Ok(())
}

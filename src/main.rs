use anyhow::{Context, Result, anyhow};
use clap::Parser;
use neon_snake::game::{GameConfig, GameController};
use neon_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neon_snake")]
#[command(version, about = "Grid snake game for the terminal")]
struct Cli {
    /// TOML config file; missing keys fall back to defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in cells (disables fitting to the terminal)
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells (disables fitting to the terminal)
    #[arg(long)]
    height: Option<u32>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Keep the configured grid when the terminal is resized
    #[arg(long)]
    no_fit: bool,

    /// Seed for food placement and particles
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.surface_width = surface_extent(width, config.cell_size)
                .ok_or_else(|| anyhow!("--width {} is too large", width))?;
            config.fit_to_terminal = false;
        }
        if let Some(height) = self.height {
            config.surface_height = surface_extent(height, config.cell_size)
                .ok_or_else(|| anyhow!("--height {} is too large", height))?;
            config.fit_to_terminal = false;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_period_ms = tick_ms;
        }
        if self.no_fit {
            config.fit_to_terminal = false;
        }

        config.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;
        Ok(config)
    }
}

/// Pixel extent of `cells` grid cells, if it fits in a `u32`
fn surface_extent(cells: u32, cell_size: u32) -> Option<u32> {
    cells.checked_mul(cell_size)
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("neon_snake=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the game, so logs only go to a file
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    tracing::info!(
        cols = config.grid().cols(),
        rows = config.grid().rows(),
        tick_ms = config.tick_period_ms,
        fit_to_terminal = config.fit_to_terminal,
        "starting"
    );

    let controller = match cli.seed {
        Some(seed) => GameController::with_seed(config, seed),
        None => GameController::new(config),
    };
    let mut human_mode = HumanMode::with_controller(controller);
    human_mode.run().await?;

    Ok(())
}

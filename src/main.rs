use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use torus_snake::game::{GameConfig, GameState};
use torus_snake::logging::init_file_logging;
use torus_snake::modes::HumanMode;
use tracing::info;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// JSON file with grid size and tick length
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second for input polling and timing
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path, cli.log_level)?;
    }

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    config.validate().context("Invalid game configuration")?;
    info!(?config, seed = ?cli.seed, fps = cli.fps, "starting game");

    let state = match cli.seed {
        Some(seed) => GameState::seeded(config, seed),
        None => GameState::from_entropy(config),
    };

    let mut human_mode = HumanMode::new(state, cli.fps);
    human_mode.run().await?;

    println!("{}", human_mode.summary());
    Ok(())
}

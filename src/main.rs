use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use torus_snake::game::GameConfig;
use torus_snake::logging;
use torus_snake::modes::{HeadlessMode, HumanMode};
use tracing::warn;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a board whose edges wrap around")]
struct Cli {
    /// Board width [default: 40]
    #[arg(long)]
    width: Option<usize>,

    /// Board height [default: 20]
    #[arg(long)]
    height: Option<usize>,

    /// Seconds between ticks [default: 0.3]
    #[arg(long)]
    tick_rate: Option<f64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Play this many ticks without a terminal and print the final board
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate = tick_rate;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        if let Err(err) = config.validate() {
            warn!(%err, "rejected game configuration");
            return Err(err).context("Invalid game configuration");
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;

    match cli.headless {
        Some(ticks) => {
            let report = HeadlessMode::new(&config)?.run(ticks);
            print!("{}", report.board);
            println!(
                "seed {}: {} after {} ticks, length {}",
                report.seed,
                if report.lost { "lost" } else { "alive" },
                report.ticks_played,
                report.length
            );
        }
        None => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
    }

    Ok(())
}

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::info;

use crate::game::{Board, Direction, GameConfig, TickOutcome};

/// Odds that the autopilot requests a turn on a given tick
const TURN_PROBABILITY: f64 = 0.25;

/// Final state of a headless run
#[derive(Debug, Clone)]
pub struct HeadlessReport {
    pub seed: u64,
    pub ticks_played: u64,
    pub length: u32,
    pub lost: bool,
    pub board: Board,
}

/// Plays a board without a terminal, turning at random
///
/// Turns and food share one seeded RNG, so a seed fully determines the run.
pub struct HeadlessMode {
    board: Board,
    rng: StdRng,
    seed: u64,
}

impl HeadlessMode {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let board = Board::from_config(config).context("Failed to create board")?;
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());

        Ok(Self {
            board,
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    /// Tick up to `max_ticks` times, stopping early on a loss
    pub fn run(mut self, max_ticks: u64) -> HeadlessReport {
        for _ in 0..max_ticks {
            let requested = if self.rng.gen_bool(TURN_PROBABILITY) {
                Some(Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())])
            } else {
                None
            };

            if let TickOutcome::Lost = self.board.tick(requested, &mut self.rng) {
                break;
            }
        }

        info!(
            seed = self.seed,
            ticks = self.board.ticks(),
            length = self.board.length(),
            lost = self.board.is_lost(),
            "headless run finished"
        );

        HeadlessReport {
            seed: self.seed,
            ticks_played: self.board.ticks(),
            length: self.board.length(),
            lost: self.board.is_lost(),
            board: self.board,
        }
    }
}

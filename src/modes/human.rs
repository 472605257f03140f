use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{Board, Direction, GameConfig, TickOutcome};
use crate::input::{InputHandler, KeyAction, describe_key};
use crate::metrics::GameMetrics;
use crate::render::{Hud, Renderer};

pub struct HumanMode {
    config: GameConfig,
    board: Board,
    rng: StdRng,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    hud: Hud,
    should_quit: bool,
    pending_direction: Option<Direction>,
    /// Set when the tick rate changed and the tick timer must be rebuilt
    retime: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let board = Board::from_config(&config).context("Failed to create board")?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let hud = Hud {
            tick_rate: config.tick_rate,
            ..Default::default()
        };

        Ok(Self {
            config,
            board,
            rng,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            hud,
            should_quit: false,
            pending_direction: None,
            retime: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            width = self.config.width,
            height = self.config.height,
            tick_rate = self.config.tick_rate,
            "game started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = self.tick_timer();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if !self.board.is_lost() && !self.hud.paused {
                        self.update_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update(!self.board.is_lost() && !self.hud.paused);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.board, &self.metrics, &self.hud);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.retime {
                tick_timer = self.tick_timer();
                self.retime = false;
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn tick_timer(&self) -> Interval {
        let mut timer = interval(self.config.tick_interval());
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            self.hud.last_key = Some(describe_key(&key));
            let action = self.input_handler.handle_key_event(key);
            self.apply_action(action)?;
        }
        Ok(())
    }

    fn apply_action(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Turn(direction) => {
                self.pending_direction = Some(direction);
            }
            KeyAction::Faster => {
                self.hud.tick_rate = self.config.faster();
                self.retime = true;
                debug!(tick_rate = self.hud.tick_rate, "sped up");
            }
            KeyAction::Slower => {
                self.hud.tick_rate = self.config.slower();
                self.retime = true;
                debug!(tick_rate = self.hud.tick_rate, "slowed down");
            }
            KeyAction::Pause => {
                if !self.board.is_lost() {
                    self.hud.paused = !self.hud.paused;
                }
            }
            KeyAction::Restart => {
                self.reset_game()?;
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
        Ok(())
    }

    fn update_game(&mut self) {
        let requested = self.pending_direction.take();

        if let TickOutcome::Lost = self.board.tick(requested, &mut self.rng) {
            info!(
                length = self.board.length(),
                ticks = self.board.ticks(),
                "game over"
            );
            self.metrics.on_game_over(self.board.length());
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.board = Board::from_config(&self.config).context("Failed to create board")?;
        self.metrics.on_game_start();
        self.pending_direction = None;
        self.hud.paused = false;
        info!("game restarted");
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

use crate::clock::{FrameClock, MonotonicClock};
use crate::game::{GameState, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::{PixelCanvas, Renderer};

/// Canvas pixels per grid cell along each axis
pub const PIXELS_PER_TILE: u32 = 2;

/// Plays one game in the terminal with keyboard controls.
///
/// Frames are pumped at a fixed rate; every frame feeds the elapsed time to
/// the game, and the screen is redrawn only when a tick actually ran.
pub struct HumanMode {
    state: GameState,
    canvas: PixelCanvas,
    frame_clock: FrameClock,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    frame_interval: Duration,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(state: GameState, frames_per_second: u32) -> Self {
        let config = state.config();
        let canvas = PixelCanvas::new(
            config.grid_width as u32 * PIXELS_PER_TILE,
            config.grid_height as u32 * PIXELS_PER_TILE,
        );
        let frame_interval = Duration::from_secs_f64(1.0 / frames_per_second.max(1) as f64);

        Self {
            state,
            canvas,
            frame_clock: FrameClock::new(MonotonicClock),
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            frame_interval,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
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

        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup runs even if the loop failed; the loop's error wins
        let cleanup = self.cleanup_terminal(&mut terminal);
        match (result, cleanup) {
            (Err(err), Err(cleanup_err)) => {
                error!(?cleanup_err, "failed to restore terminal");
                Err(err)
            }
            (result, cleanup) => result.and(cleanup),
        }
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(self.frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Terminal setup time is not game time
        self.frame_clock = FrameClock::new(MonotonicClock);
        self.metrics = SessionMetrics::new();
        self.state.render(&mut self.canvas);
        self.draw(terminal)?;

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = frame_timer.tick() => {
                    let dt = self.frame_clock.update();
                    if self.apply_frame(dt) {
                        self.draw(terminal)?;
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit || !self.state.is_running() {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                self.state.handle_direction_input(direction);
            }
            KeyAction::Quit => {
                debug!("quit requested");
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Advance the game by one frame's worth of time. Returns true when the
    /// canvas changed and the screen needs a redraw.
    fn apply_frame(&mut self, delta_seconds: f64) -> bool {
        let length_before = self.state.len();

        match self.state.advance(delta_seconds) {
            TickOutcome::Idle => false,
            TickOutcome::Stepped => {
                self.metrics.on_tick(length_before, self.state.len());
                self.state.render(&mut self.canvas);
                true
            }
            TickOutcome::GameOver => {
                info!(
                    length = self.state.len(),
                    ticks = self.metrics.ticks,
                    "game over"
                );
                false
            }
        }
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, &self.canvas, &self.state, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    /// One line describing how the session ended
    pub fn summary(&self) -> String {
        let ending = if self.state.is_running() {
            "Quit"
        } else {
            "Game over"
        };
        format!(
            "{}: length {} after {} ticks ({})",
            ending,
            self.state.len(),
            self.metrics.ticks,
            self.metrics.format_time()
        )
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

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use tokio::time::{Instant, interval, interval_at};
use tracing::{debug, info};

use crate::audio::AudioAdapter;
use crate::game::{FieldSize, FrameResult, GameConfig, GameEvent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::session::GameSession;

/// Interactive play in the terminal.
///
/// One task drives everything: key events, the fixed-rate movement tick and
/// the frame timer are multiplexed with `select!`, so a frame never observes
/// a half-applied tick.
pub struct HumanMode {
    session: GameSession,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: AudioAdapter,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, audio: AudioAdapter) -> Self {
        Self {
            session: GameSession::new(config),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
            should_quit: false,
        }
    }

    /// Field size matching the current terminal
    pub fn terminal_field(cell_size: u32) -> Result<FieldSize> {
        let (width, height) =
            crossterm::terminal::size().context("Failed to query terminal size")?;
        Ok(Renderer::field_for(Rect::new(0, 0, width, height), cell_size))
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

        self.cleanup_terminal(&mut terminal)?;

        info!(
            rounds = self.metrics.rounds_finished,
            best = self.metrics.best_score,
            "Session ended"
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = self.session.config().tick_interval();
        let mut tick_timer = interval_at(Instant::now() + tick_interval, tick_interval);
        let mut frame_timer = interval(self.session.config().frame_interval());

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.session.tick();
                }

                _ = frame_timer.tick() => {
                    let result = self.session.frame();
                    self.on_frame(&result);
                    let snapshot = self.session.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match self.input_handler.handle_key_event(key) {
                    KeyAction::Turn(direction) => {
                        self.session.set_direction(direction);
                    }
                    KeyAction::Retry => self.retry(),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Resize(width, height) => {
                let cell_size = self.session.config().cell_size;
                let field = Renderer::field_for(Rect::new(0, 0, width, height), cell_size);
                self.session.resize(field);
            }
            _ => {}
        }
    }

    /// Feed one frame's events to the metrics and the sound adapter
    fn on_frame(&mut self, result: &FrameResult) {
        self.metrics.update();
        for event in &result.events {
            match event {
                GameEvent::AppleEaten { .. } => self.metrics.on_apple_eaten(),
                GameEvent::GameOver { score, .. } => self.metrics.on_round_over(*score),
            }
        }
        self.audio.handle(&result.events);
    }

    /// Start a new round; only available once the current one is over
    fn retry(&mut self) {
        if !self.session.is_over() {
            debug!("Retry ignored while the round is running");
            return;
        }
        self.session.reset();
        self.metrics.on_round_start();
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

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
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{Command, GameConfig, GameController, GameEvent, Schedule};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::scheduler::TickScheduler;

pub struct HumanMode {
    controller: GameController,
    scheduler: TickScheduler,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self::with_controller(GameController::new(config))
    }

    pub fn with_controller(controller: GameController) -> Self {
        Self {
            controller,
            scheduler: TickScheduler::new(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
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

        // Render at 30 FPS (33ms per frame), independent of the tick rate
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = self.scheduler.tick() => {
                    let schedule = self.controller.tick();
                    self.apply_schedule(schedule);
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.controller.state(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            games_played = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "session finished"
        );
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
            KeyAction::Game(command) => self.dispatch(command),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn dispatch(&mut self, command: Command) {
        debug!(?command, "command");
        let schedule = self.controller.apply(command);
        self.apply_schedule(schedule);
    }

    /// Hand the timer decision to the scheduler, then fan out queued events
    fn apply_schedule(&mut self, schedule: Schedule) {
        self.scheduler.apply(schedule);

        for event in self.controller.drain_events() {
            self.metrics.observe(&event);
            match event {
                GameEvent::ScoreChanged(score) => debug!(score, "score changed"),
                GameEvent::GameOver { score, collision } => {
                    info!(
                        score,
                        ?collision,
                        high_score = self.metrics.high_score,
                        "game over"
                    );
                }
                GameEvent::PhaseChanged(_) | GameEvent::SpeedChanged(_) => {}
            }
        }
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

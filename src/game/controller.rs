//! Game state machine
//!
//! The controller owns the single `GameState`, applies player commands and
//! ticks, and tells the caller how the tick timer must change. Notifications
//! for the presentation layer are queued as [`GameEvent`]s.

use std::time::Duration;
use tracing::{debug, info};

use super::{
    action::{Command, Direction},
    config::{GameConfig, SpeedLevel},
    engine::{GameEngine, StepResult},
    state::{CollisionType, GamePhase, GameState},
};

/// What the tick timer must do after a command or tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Leave the timer as it is
    Keep,
    /// Drop the pending tick without scheduling another
    Cancel,
    /// Drop the pending tick and schedule ticks at this interval
    Restart(Duration),
}

/// Notification emitted by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u32),
    GameOver {
        score: u32,
        collision: CollisionType,
    },
    PhaseChanged(GamePhase),
    SpeedChanged(Duration),
}

pub struct GameController {
    engine: GameEngine,
    state: GameState,
    /// Survives restarts
    speed: SpeedLevel,
    events: Vec<GameEvent>,
}

impl GameController {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(GameEngine::new(config))
    }

    pub fn with_engine(mut engine: GameEngine) -> Self {
        let speed = engine.config().initial_speed;
        let state = engine.reset(speed);
        Self {
            engine,
            state,
            speed,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn apply(&mut self, command: Command) -> Schedule {
        match command {
            Command::Turn(direction) => {
                self.set_pending_direction(direction);
                Schedule::Keep
            }
            Command::SetSpeed(level) => self.set_speed(level),
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Restart => self.restart(),
        }
    }

    /// Stage a direction for the next tick. Ignored unless running.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if self.state.is_running() {
            self.state.pending_direction = direction;
        }
    }

    /// Select a speed level; takes effect immediately while running
    pub fn set_speed(&mut self, level: SpeedLevel) -> Schedule {
        self.speed = level;
        self.state.speed = level;

        let interval = self.engine.config().interval_for(level);
        if interval == self.state.tick_interval {
            return Schedule::Keep;
        }

        self.state.tick_interval = interval;
        self.events.push(GameEvent::SpeedChanged(interval));
        debug!(speed = level.as_str(), ?interval, "speed changed");

        if self.state.is_running() {
            Schedule::Restart(interval)
        } else {
            Schedule::Keep
        }
    }

    pub fn start(&mut self) -> Schedule {
        if self.state.phase != GamePhase::Idle {
            return Schedule::Keep;
        }
        info!(grid_size = self.state.grid_size, "game started");
        self.transition(GamePhase::Running);
        Schedule::Restart(self.state.tick_interval)
    }

    /// Toggle between running and paused; a no-op in any other phase
    pub fn pause(&mut self) -> Schedule {
        match self.state.phase {
            GamePhase::Running => {
                self.transition(GamePhase::Paused);
                Schedule::Cancel
            }
            GamePhase::Paused => {
                self.transition(GamePhase::Running);
                Schedule::Restart(self.state.tick_interval)
            }
            GamePhase::Idle | GamePhase::Ended => Schedule::Keep,
        }
    }

    /// Reinitialize every entity and start a new game
    pub fn restart(&mut self) -> Schedule {
        self.state = self.engine.reset(self.speed);
        self.events.push(GameEvent::PhaseChanged(GamePhase::Idle));
        self.events.push(GameEvent::ScoreChanged(0));
        debug!("game reset");
        self.start()
    }

    /// Run one update step
    pub fn tick(&mut self) -> Schedule {
        let score_before = self.state.score;
        let StepResult {
            ate_food,
            collision_type,
            terminated,
            speed_changed,
        } = self.engine.step(&mut self.state);

        if let Some(collision) = collision_type {
            info!(score = self.state.score, ?collision, "game over");
            self.events.push(GameEvent::PhaseChanged(GamePhase::Ended));
            self.events.push(GameEvent::GameOver {
                score: self.state.score,
                collision,
            });
            return Schedule::Cancel;
        }
        if terminated {
            return Schedule::Cancel;
        }

        if ate_food && self.state.score != score_before {
            self.events.push(GameEvent::ScoreChanged(self.state.score));
            if self.state.food.is_none() {
                debug!(length = self.state.snake.len(), "grid full, no food placed");
            }
        }

        if speed_changed {
            self.events.push(GameEvent::SpeedChanged(self.state.tick_interval));
            Schedule::Restart(self.state.tick_interval)
        } else {
            Schedule::Keep
        }
    }

    fn transition(&mut self, to: GamePhase) {
        debug!(
            from = self.state.phase.as_str(),
            to = to.as_str(),
            "phase transition"
        );
        self.state.phase = to;
        self.events.push(GameEvent::PhaseChanged(to));
    }
}

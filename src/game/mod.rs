//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Ticks, commands and timer decisions are plain synchronous calls.

pub mod action;
pub mod config;
pub mod controller;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{GameConfig, SpeedLevel, SpeedTable};
pub use controller::{GameController, GameEvent, Schedule};
pub use engine::{GameEngine, StepResult};
pub use food::place_food;
pub use state::{CollisionType, GamePhase, GameState, Position, Snake};

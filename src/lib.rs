//! Grid Snake - a terminal snake game
//!
//! This library provides:
//! - Core game logic and the phase state machine (game module)
//! - A cancellable tick timer (scheduler module)
//! - TUI rendering and keyboard input (render, input modules)
//! - The interactive play loop (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;

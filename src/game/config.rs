use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

const MIN_GRID_SIZE: usize = 4;
/// Keeps coordinates well inside `i32` and food placement scans small
pub const MAX_GRID_SIZE: usize = 255;

/// Discrete tick speed selected by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedLevel {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl SpeedLevel {
    /// Map a three-position slider value to a level; unknown values fall back to medium
    pub fn from_slider(value: u8) -> Self {
        match value {
            1 => SpeedLevel::Slow,
            3 => SpeedLevel::Fast,
            _ => SpeedLevel::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedLevel::Slow => "Slow",
            SpeedLevel::Medium => "Medium",
            SpeedLevel::Fast => "Fast",
        }
    }
}

/// Tick interval in milliseconds for each speed level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTable {
    pub slow_ms: u64,
    pub medium_ms: u64,
    pub fast_ms: u64,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            slow_ms: 250,
            medium_ms: 150,
            fast_ms: 80,
        }
    }
}

impl SpeedTable {
    pub fn millis(&self, level: SpeedLevel) -> u64 {
        match level {
            SpeedLevel::Slow => self.slow_ms,
            SpeedLevel::Medium => self.medium_ms,
            SpeedLevel::Fast => self.fast_ms,
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square game grid
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Speed level used until the player picks another
    pub initial_speed: SpeedLevel,
    pub speeds: SpeedTable,
    /// Lower bound for any tick interval
    pub min_interval_ms: u64,
    /// Interval reduction applied each time food is eaten. Zero disables it.
    pub speed_increment_ms: u64,
    /// Points awarded per food eaten
    pub score_per_food: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 3,
            initial_speed: SpeedLevel::Medium,
            speeds: SpeedTable::default(),
            min_interval_ms: 50,
            speed_increment_ms: 0,
            score_per_food: 10,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a configuration from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be between {MIN_GRID_SIZE} and {MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if self.initial_snake_length == 0 || self.initial_snake_length > self.grid_size {
            return Err(ConfigError::Invalid(format!(
                "initial_snake_length must be between 1 and {}, got {}",
                self.grid_size, self.initial_snake_length
            )));
        }
        if self.min_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "min_interval_ms must be positive".to_string(),
            ));
        }
        for level in [SpeedLevel::Slow, SpeedLevel::Medium, SpeedLevel::Fast] {
            if self.speeds.millis(level) == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{} interval must be positive",
                    level.as_str().to_lowercase()
                )));
            }
        }
        if self.score_per_food == 0 {
            return Err(ConfigError::Invalid(
                "score_per_food must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Tick interval for a speed level, clamped to the configured minimum
    pub fn interval_for(&self, level: SpeedLevel) -> Duration {
        Duration::from_millis(self.speeds.millis(level).max(self.min_interval_ms))
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn speed_increment(&self) -> Duration {
        Duration::from_millis(self.speed_increment_ms)
    }
}

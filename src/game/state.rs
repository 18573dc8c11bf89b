use std::collections::VecDeque;
use std::time::Duration;

use super::action::Direction;
use super::config::SpeedLevel;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    pub body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction.
    /// `length` is clamped to at least one segment.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    pub fn from_segments<I>(segments: I, direction: Direction) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let body: VecDeque<Position> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if any segment, head or tail included, occupies `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Phase of the game state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Initialized and waiting for a start command
    #[default]
    Idle,
    Running,
    Paused,
    /// Terminal until restart
    Ended,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "Idle",
            GamePhase::Running => "Running",
            GamePhase::Paused => "Paused",
            GamePhase::Ended => "Ended",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Absent only when every cell is occupied by the snake
    pub food: Option<Position>,
    /// Latest requested direction, committed at the next tick
    pub pending_direction: Direction,
    pub grid_size: usize,
    pub score: u32,
    pub steps: u32,
    pub phase: GamePhase,
    pub speed: SpeedLevel,
    /// Active tick interval; may drift below the level's interval when a
    /// speed increment is configured
    pub tick_interval: Duration,
}

impl GameState {
    /// Create a new idle game state
    pub fn new(
        snake: Snake,
        food: Option<Position>,
        grid_size: usize,
        speed: SpeedLevel,
        tick_interval: Duration,
    ) -> Self {
        let pending_direction = snake.direction;
        Self {
            snake,
            food,
            pending_direction,
            grid_size,
            score: 0,
            steps: 0,
            phase: GamePhase::Idle,
            speed,
            tick_interval,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

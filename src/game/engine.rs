use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::Direction,
    config::{GameConfig, SpeedLevel},
    food::place_food,
    state::{CollisionType, GamePhase, GameState, Position, Snake},
};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether the game has ended (this step or earlier)
    pub terminated: bool,
    /// Whether the tick interval changed and the timer must be rescheduled
    pub speed_changed: bool,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            ate_food: false,
            collision_type: None,
            terminated,
            speed_changed: false,
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with a fixed food sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh idle game at the given speed
    pub fn reset(&mut self, speed: SpeedLevel) -> GameState {
        let length = self.config.initial_snake_length;
        let grid_size = self.config.grid_size;
        let head_x = (grid_size / 4).max(length.saturating_sub(1));
        let head = Position::new(head_x as i32, (grid_size / 2) as i32);

        let snake = Snake::new(head, Direction::Right, length);
        let food = place_food(&mut self.rng, &snake, grid_size);

        let interval = self.config.interval_for(speed);
        GameState::new(snake, food, grid_size, speed, interval)
    }

    /// Execute one tick of the game. Does nothing unless the phase is running.
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if state.phase != GamePhase::Running {
            return StepResult::idle(state.phase == GamePhase::Ended);
        }

        // The pending direction is kept even when rejected; a later tick
        // re-checks it against the then-current direction.
        if !state.snake.direction.is_opposite(state.pending_direction) {
            state.snake.direction = state.pending_direction;
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.phase = GamePhase::Ended;
            return StepResult {
                ate_food: false,
                collision_type: Some(collision_type),
                terminated: true,
                speed_changed: false,
            };
        }

        state.snake.body.push_front(new_head);
        state.steps += 1;

        let ate_food = state.food == Some(new_head);
        let mut speed_changed = false;

        if ate_food {
            state.score += self.config.score_per_food;
            state.food = place_food(&mut self.rng, &state.snake, state.grid_size);
            speed_changed = self.accelerate(state);
        } else {
            state.snake.body.pop_back();
            if state.food.is_none() {
                state.food = place_food(&mut self.rng, &state.snake, state.grid_size);
            }
        }

        StepResult {
            ate_food,
            collision_type: None,
            terminated: false,
            speed_changed,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail has not moved yet, so stepping onto it counts.
        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Shorten the tick interval by the configured increment, never below the minimum
    fn accelerate(&self, state: &mut GameState) -> bool {
        let min = self.config.min_interval();
        if state.tick_interval <= min {
            return false;
        }

        let next = state
            .tick_interval
            .saturating_sub(self.config.speed_increment())
            .max(min);
        let changed = next != state.tick_interval;
        state.tick_interval = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn running(mut state: GameState) -> GameState {
        state.phase = GamePhase::Running;
        state
    }

    fn state_on_grid(snake: Snake, food: Option<Position>, grid_size: usize) -> GameState {
        running(GameState::new(
            snake,
            food,
            grid_size,
            SpeedLevel::Medium,
            Duration::from_millis(150),
        ))
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let state = engine.reset(SpeedLevel::Medium);

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(
            state.snake.body.iter().copied().collect::<Vec<_>>(),
            vec![Position::new(5, 10), Position::new(4, 10), Position::new(3, 10)]
        );
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.tick_interval, Duration::from_millis(150));

        let food = state.food.unwrap();
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn test_reset_small_grid_fits_snake() {
        let mut engine = GameEngine::with_seed(GameConfig::new(4), 1);
        let state = engine.reset(SpeedLevel::Slow);

        assert!(state.snake.body.iter().all(|&pos| state.is_in_bounds(pos)));
        assert_eq!(state.tick_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_step_ignored_unless_running() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let mut state = engine.reset(SpeedLevel::Medium);
        let before = state.clone();

        let result = engine.step(&mut state);
        assert!(!result.terminated);
        assert_eq!(state, before);

        state.phase = GamePhase::Paused;
        engine.step(&mut state);
        assert_eq!(state.snake, before.snake);

        state.phase = GamePhase::Ended;
        assert!(engine.step(&mut state).terminated);
        assert_eq!(state.snake, before.snake);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let snake = Snake::new(Position::new(5, 10), Direction::Right, 3);
        let mut state = state_on_grid(snake, Some(Position::new(15, 15)), 20);

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert!(!result.ate_food);
        assert_eq!(
            state.snake.body.iter().copied().collect::<Vec<_>>(),
            vec![Position::new(6, 10), Position::new(5, 10), Position::new(4, 10)]
        );
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 9);
        let snake = Snake::new(Position::new(5, 10), Direction::Right, 3);
        let mut state = state_on_grid(snake, Some(Position::new(6, 10)), 20);

        let result = engine.step(&mut state);

        assert!(result.ate_food);
        assert!(!result.speed_changed);
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.tail(), Position::new(3, 10));

        let food = state.food.unwrap();
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn test_wall_collision_freezes_state() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let snake = Snake::new(Position::new(0, 10), Direction::Left, 3);
        let mut state = state_on_grid(snake, Some(Position::new(8, 8)), 20);
        state.score = 30;
        let snake_before = state.snake.clone();

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.score, 30);
        assert_eq!(state.snake, snake_before);
        assert_eq!(state.food, Some(Position::new(8, 8)));

        let again = engine.step(&mut state);
        assert!(again.terminated);
        assert_eq!(again.collision_type, None);
        assert_eq!(state.snake, snake_before);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);

        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = state_on_grid(snake, Some(Position::new(8, 8)), 10);

        // Down: (5,6), (5,5), (4,5), (3,5), (2,5)
        state.pending_direction = Direction::Down;
        engine.step(&mut state);
        // Left: (4,6), (5,6), (5,5), (4,5), (3,5)
        state.pending_direction = Direction::Left;
        engine.step(&mut state);
        // Up: (4,5) is still body
        state.pending_direction = Direction::Up;
        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.collision_type, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_moving_onto_tail_cell_collides() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        // Square loop: head (1,0), then (1,1), (0,1), tail (0,0)
        let snake = Snake::from_segments(
            [
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(0, 1),
                Position::new(0, 0),
            ],
            Direction::Up,
        );
        let mut state = state_on_grid(snake, Some(Position::new(8, 8)), 10);
        state.pending_direction = Direction::Left;

        let result = engine.step(&mut state);
        assert_eq!(result.collision_type, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let mut state = state_on_grid(snake, Some(Position::new(0, 0)), 10);
        state.pending_direction = Direction::Left;

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), Position::new(6, 5));
        // rejected request stays staged
        assert_eq!(state.pending_direction, Direction::Left);
    }

    #[test]
    fn test_rejected_pending_applies_after_turn() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let mut state = state_on_grid(snake, Some(Position::new(0, 0)), 10);

        state.pending_direction = Direction::Up;
        engine.step(&mut state);
        assert_eq!(state.snake.direction, Direction::Up);

        state.pending_direction = Direction::Down;
        engine.step(&mut state);
        assert_eq!(state.snake.direction, Direction::Up);

        state.pending_direction = Direction::Left;
        engine.step(&mut state);
        assert_eq!(state.snake.direction, Direction::Left);
    }

    #[test]
    fn test_speed_increment_shortens_interval() {
        let config = GameConfig {
            speed_increment_ms: 40,
            ..GameConfig::default()
        };
        let mut engine = GameEngine::with_seed(config, 5);
        let snake = Snake::new(Position::new(5, 10), Direction::Right, 3);
        let mut state = state_on_grid(snake, Some(Position::new(6, 10)), 20);
        state.tick_interval = Duration::from_millis(80);

        let result = engine.step(&mut state);
        assert!(result.speed_changed);
        assert_eq!(state.tick_interval, Duration::from_millis(50));

        state.food = Some(state.snake.head().moved_in_direction(Direction::Right));
        let result = engine.step(&mut state);
        assert!(result.ate_food);
        assert!(!result.speed_changed);
        assert_eq!(state.tick_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_eating_last_free_cell_leaves_food_absent() {
        let mut engine = GameEngine::with_seed(GameConfig::new(4), 1);
        // Fills the 4x4 grid except (0,0); head at (1,0) moving left
        let snake = Snake::from_segments(
            [
                (1, 0), (2, 0), (3, 0), (3, 1), (2, 1), (1, 1), (0, 1), (0, 2), (1, 2), (2, 2),
                (3, 2), (3, 3), (2, 3), (1, 3), (0, 3),
            ]
            .map(|(x, y)| Position::new(x, y)),
            Direction::Left,
        );
        let mut state = state_on_grid(snake, Some(Position::new(0, 0)), 4);

        let result = engine.step(&mut state);
        assert!(result.ate_food);
        assert_eq!(state.snake.len(), 16);
        assert_eq!(state.food, None);

        // Movement rules still apply: every neighbour is wall or body.
        let result = engine.step(&mut state);
        assert!(result.terminated);
        assert_eq!(state.phase, GamePhase::Ended);
    }
}

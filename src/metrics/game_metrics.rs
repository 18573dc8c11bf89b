use std::time::{Duration, Instant};

use crate::game::{GameEvent, GamePhase};

/// Per-session statistics, kept in memory only
pub struct GameMetrics {
    /// Play time banked before the current running stretch
    banked: Duration,
    running_since: Option<Instant>,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            banked: Duration::ZERO,
            running_since: None,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Play time of the current game, excluding paused stretches
    pub fn elapsed(&self) -> Duration {
        self.banked
            + self
                .running_since
                .map(|since| since.elapsed())
                .unwrap_or(Duration::ZERO)
    }

    pub fn observe(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PhaseChanged(GamePhase::Idle) => self.on_game_start(),
            GameEvent::PhaseChanged(GamePhase::Running) => self.on_resume(),
            GameEvent::PhaseChanged(GamePhase::Paused | GamePhase::Ended) => self.on_pause(),
            GameEvent::GameOver { score, .. } => self.on_game_over(*score),
            GameEvent::ScoreChanged(_) | GameEvent::SpeedChanged(_) => {}
        }
    }

    pub fn on_game_start(&mut self) {
        self.banked = Duration::ZERO;
        self.running_since = None;
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.on_pause();
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }
}

fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CollisionType;

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_duration(Duration::from_secs(125)), "02:05");
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00");
        assert_eq!(format_duration(Duration::from_secs(3661)), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.observe(&GameEvent::GameOver {
            score: 15,
            collision: CollisionType::Wall,
        });
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_clock_stops_while_paused() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.elapsed(), Duration::ZERO);

        metrics.observe(&GameEvent::PhaseChanged(GamePhase::Running));
        std::thread::sleep(Duration::from_millis(30));
        metrics.observe(&GameEvent::PhaseChanged(GamePhase::Paused));

        let paused_at = metrics.elapsed();
        assert!(paused_at >= Duration::from_millis(30));
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(metrics.elapsed(), paused_at);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.on_resume();
        std::thread::sleep(Duration::from_millis(20));
        metrics.on_pause();
        assert!(metrics.elapsed() >= Duration::from_millis(20));

        metrics.observe(&GameEvent::PhaseChanged(GamePhase::Idle));
        assert_eq!(metrics.elapsed(), Duration::ZERO);
    }
}

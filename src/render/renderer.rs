use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use std::collections::HashMap;

use crate::game::{GamePhase, GameState, Position};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        frame.render_widget(self.render_grid(state), game_area);

        let overlay = match state.phase {
            GamePhase::Idle => Some(self.render_banner(
                "SNAKE",
                "Press Enter to start",
                Color::Green,
            )),
            GamePhase::Paused => Some(self.render_banner(
                "PAUSED",
                "Press Space to resume",
                Color::Yellow,
            )),
            GamePhase::Ended => Some(self.render_game_over(state, metrics)),
            GamePhase::Running => None,
        };
        if let Some(overlay) = overlay {
            let area = centered(game_area, 40, 9);
            frame.render_widget(Clear, area);
            frame.render_widget(overlay, area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let segments: HashMap<Position, usize> = state
            .snake
            .body
            .iter()
            .enumerate()
            .map(|(index, &pos)| (pos, index))
            .collect();

        let mut lines = Vec::with_capacity(state.grid_size);

        for y in 0..state.grid_size {
            let mut spans = Vec::with_capacity(state.grid_size);

            for x in 0..state.grid_size {
                let pos = Position::new(x as i32, y as i32);

                let cell = match segments.get(&pos) {
                    Some(0) => Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Rgb(76, 175, 80))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(&index) => Span::styled("■ ", Style::default().fg(body_color(index))),
                    None if state.food == Some(pos) => Span::styled(
                        "● ",
                        Style::default()
                            .fg(Color::Rgb(231, 76, 60))
                            .add_modifier(Modifier::BOLD),
                    ),
                    None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(
                format!(
                    "{} ({}ms)",
                    state.speed.as_str(),
                    state.tick_interval.as_millis()
                ),
                value,
            ),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_banner(
        &self,
        title: &'static str,
        hint: &'static str,
        color: Color,
    ) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  (games: {})", metrics.games_played),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→/WASD", key),
            Span::raw(" move | "),
            Span::styled("Enter", key),
            Span::raw(" start | "),
            Span::styled("Space", key),
            Span::raw(" pause | "),
            Span::styled("1-3", key),
            Span::raw(" speed | "),
            Span::styled("R", key),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Body segments darken towards the tail, bottoming out at a fixed green
fn body_color(index: usize) -> Color {
    let green = 150usize.saturating_sub(index * 3).max(100);
    Color::Rgb(0, green as u8, 0)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

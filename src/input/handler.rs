use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction, SpeedLevel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let command = match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Command::Turn(Direction::Up),
            KeyCode::Down => Command::Turn(Direction::Down),
            KeyCode::Left => Command::Turn(Direction::Left),
            KeyCode::Right => Command::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Command::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Command::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Command::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Command::Turn(Direction::Right),

            // Speed selector
            KeyCode::Char(c @ '1'..='3') => {
                Command::SetSpeed(SpeedLevel::from_slider(c as u8 - b'0'))
            }

            // Controls
            KeyCode::Enter => Command::Start,
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => Command::Pause,
            KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,

            _ => return KeyAction::None,
        };

        KeyAction::Game(command)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

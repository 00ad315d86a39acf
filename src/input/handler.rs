use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Retry,
    Quit,
    None,
}

/// Maps terminal key presses to session commands
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w' | 'W') => KeyAction::Turn(Direction::Up),
            KeyCode::Down | KeyCode::Char('s' | 'S') => KeyAction::Turn(Direction::Down),
            KeyCode::Left | KeyCode::Char('a' | 'A') => KeyAction::Turn(Direction::Left),
            KeyCode::Right | KeyCode::Char('d' | 'D') => KeyAction::Turn(Direction::Right),

            KeyCode::Char('r' | 'R') | KeyCode::Enter => KeyAction::Retry,
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    Quit,
}

/// Drains pending terminal key events without blocking.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns the next mapped input event, or `None` when the event queue
    /// holds nothing relevant. Never blocks.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(input) = map_key_event(key) {
                    return Ok(Some(input));
                }
            }
        }
        Ok(None)
    }
}

/// Maps one key press to a game input, if it is bound.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GameInput::Direction(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameInput::Direction(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameInput::Direction(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameInput::Direction(Direction::Right))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Restart),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameInput::Quit),
        _ => None,
    }
}

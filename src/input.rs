use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::components::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Start,
    Restart,
    Quit,
}

/// Arrow keys and WASD steer; anything unmapped yields `None`.
pub fn translate(key: KeyEvent) -> Option<Command> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {}
        KeyEventKind::Release => return None,
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Up => Command::Steer(Direction::Up),
        KeyCode::Down => Command::Steer(Direction::Down),
        KeyCode::Left => Command::Steer(Direction::Left),
        KeyCode::Right => Command::Steer(Direction::Right),
        KeyCode::Enter => Command::Start,
        KeyCode::Esc => Command::Quit,
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            'w' => Command::Steer(Direction::Up),
            's' => Command::Steer(Direction::Down),
            'a' => Command::Steer(Direction::Left),
            'd' => Command::Steer(Direction::Right),
            ' ' => Command::Start,
            'r' => Command::Restart,
            'q' => Command::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(command)
}

//! Mapping from terminal events to host actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Cursor step direction, in board terms (up is toward the top row)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// What the host loop should do in response to one terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Left mouse press at a terminal cell
    Click { column: u16, row: u16 },
    MoveCursor(Direction),
    /// Click the cell under the keyboard cursor
    SelectAtCursor,
    Restart,
    Quit,
}

/// Map keyboard input to host actions.
pub fn handle_key_event(key: KeyEvent) -> Option<HostAction> {
    if should_quit(key) {
        return Some(HostAction::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(HostAction::MoveCursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(HostAction::MoveCursor(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(HostAction::MoveCursor(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(HostAction::MoveCursor(Direction::Down))
        }

        KeyCode::Char(' ') | KeyCode::Enter => Some(HostAction::SelectAtCursor),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(HostAction::Restart),

        _ => None,
    }
}

/// Only left-button presses count; drags and releases are ignored.
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<HostAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(HostAction::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

/// Map any terminal event. Key releases are dropped; auto-repeat is kept so
/// a held arrow keeps moving the cursor.
pub fn map_event(event: &Event) -> Option<HostAction> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(*key),
        Event::Mouse(mouse) => handle_mouse_event(*mouse),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

//! Keyboard and mouse mapping
//!
//! Space or Up jumps. R, Enter or a left click restarts after a crash.
//! Q, Esc or Ctrl-C quits.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// What the driver loop should do with a terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
    Restart,
    Quit,
    /// New terminal size in columns and rows
    Resize(u16, u16),
}

pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(cols, rows) => Some(InputEvent::Resize(*cols, *rows)),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    // Repeats and releases only show up with keyboard enhancement; ignore them
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char(' ') | KeyCode::Up => Some(InputEvent::Jump),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(InputEvent::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Option<InputEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Restart),
        _ => None,
    }
}

//! Backend-agnostic input events.
//!
//! Backends translate whatever their terminal library produces into [`Event`]; the dispatch loop
//! and window handlers only ever see these types.

use crate::error::BackendError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyModifiers {
    pub fn none() -> Self {
        Self::default()
    }
}

/// The keys windows react to. Backends drop presses of anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Esc,
    Up,
    Down,
}

/// A key press. Two events are the same binding only if code and modifiers both match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::none(),
        }
    }

    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c))
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers {
                ctrl: true,
                ..KeyModifiers::none()
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    Down(MouseButton),
    Drag(MouseButton),
    Up(MouseButton),
    ScrollUp,
    ScrollDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: u16,
    pub y: u16,
    pub kind: MouseEventKind,
    pub modifiers: KeyModifiers,
}

/// One event pulled from the backend.
#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Paste(String),
    Mouse(MouseEvent),
    /// The terminal was resized to `width` x `height` cells.
    Resize { width: u16, height: u16 },
    /// The backend failed while polling. Fatal for the dispatch loop.
    Error(BackendError),
}

impl Event {
    pub fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    pub fn is_resize(&self) -> bool {
        matches!(self, Self::Resize { .. })
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_compare_code_and_modifiers() {
        assert_eq!(KeyEvent::char('j'), KeyEvent::new(KeyCode::Char('j')));
        assert_ne!(KeyEvent::char('j'), KeyEvent::ctrl('j'));
        assert_ne!(KeyEvent::char('j'), KeyEvent::char('k'));
        assert!(KeyEvent::ctrl('e').modifiers.ctrl);
        assert_eq!(Event::key(KeyCode::Tab).as_key(), Some(&KeyEvent::new(KeyCode::Tab)));
        assert!(Event::Resize { width: 1, height: 1 }.as_key().is_none());
    }
}

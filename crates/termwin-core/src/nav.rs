//! Key bindings for row navigation.
//!
//! [`NavBindings`] turns key and mouse-wheel events into [`NavAction`]s and applies them to a
//! window. Install it as a window's event handler to get a working list view:
//!
//! ```no_run
//! # use termwin_core::nav::NavBindings;
//! # fn demo(window: &termwin_core::window::Window) {
//! let nav = NavBindings::default();
//! window.set_event_handler(move |w, ev| {
//!     if let Err(err) = nav.handle(w, ev) {
//!         tracing::warn!(error = %err, "navigation redraw failed");
//!     }
//! });
//! # }
//! ```

use crate::error::Result;
use crate::input::Event;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEventKind;
use crate::window::Window;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    NextRow,
    PrevRow,
    ScrollUp,
    ScrollDown,
}

#[derive(Clone, Debug)]
pub struct NavBindings {
    pub next_row: Vec<KeyEvent>,
    pub prev_row: Vec<KeyEvent>,
    pub scroll_up: Vec<KeyEvent>,
    pub scroll_down: Vec<KeyEvent>,
    /// Map the mouse wheel to scrolling.
    pub wheel: bool,
}

impl Default for NavBindings {
    fn default() -> Self {
        Self {
            next_row: vec![KeyEvent::new(KeyCode::Down), KeyEvent::char('j')],
            prev_row: vec![KeyEvent::new(KeyCode::Up), KeyEvent::char('k')],
            scroll_up: vec![KeyEvent::ctrl('y')],
            scroll_down: vec![KeyEvent::ctrl('e')],
            wheel: true,
        }
    }
}

impl NavBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<NavAction> {
        let hit = |keys: &[KeyEvent]| keys.contains(key);
        if hit(&self.next_row) {
            return Some(NavAction::NextRow);
        }
        if hit(&self.prev_row) {
            return Some(NavAction::PrevRow);
        }
        if hit(&self.scroll_up) {
            return Some(NavAction::ScrollUp);
        }
        if hit(&self.scroll_down) {
            return Some(NavAction::ScrollDown);
        }
        None
    }

    pub fn action_for_event(&self, event: &Event) -> Option<NavAction> {
        match event {
            Event::Key(key) => self.action_for(key),
            Event::Mouse(m) if self.wheel => match m.kind {
                MouseEventKind::ScrollUp => Some(NavAction::ScrollUp),
                MouseEventKind::ScrollDown => Some(NavAction::ScrollDown),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn apply(&self, window: &Window, action: NavAction) {
        match action {
            NavAction::NextRow => window.next_row(),
            NavAction::PrevRow => window.prev_row(),
            NavAction::ScrollUp => window.scroll_up(),
            NavAction::ScrollDown => window.scroll_down(),
        }
    }

    /// Applies the action bound to `event`, then redraws and flushes. Returns whether the event
    /// was bound.
    pub fn handle(&self, window: &Window, event: &Event) -> Result<bool> {
        let Some(action) = self.action_for_event(event) else {
            return Ok(false);
        };
        self.apply(window, action);
        window.redraw()?;
        window.backend().flush()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test::TestBackend;
    use crate::input::KeyModifiers;
    use crate::input::MouseButton;
    use crate::input::MouseEvent;
    use crate::screen::Screen;
    use crate::window::WindowOptions;
    use ratatui::style::Color;
    use std::sync::Arc;

    #[test]
    fn defaults_cover_arrows_and_vim_keys() {
        let nav = NavBindings::default();
        assert_eq!(
            nav.action_for(&KeyEvent::new(KeyCode::Down)),
            Some(NavAction::NextRow)
        );
        assert_eq!(
            nav.action_for(&KeyEvent::char('k')),
            Some(NavAction::PrevRow)
        );
        assert_eq!(
            nav.action_for(&KeyEvent::ctrl('e')),
            Some(NavAction::ScrollDown)
        );
        assert_eq!(nav.action_for(&KeyEvent::char('e')), None);
    }

    #[test]
    fn wheel_maps_to_scrolling_unless_disabled() {
        let wheel = Event::Mouse(MouseEvent {
            x: 0,
            y: 0,
            kind: MouseEventKind::ScrollDown,
            modifiers: KeyModifiers::none(),
        });
        let click = Event::Mouse(MouseEvent {
            x: 0,
            y: 0,
            kind: MouseEventKind::Down(MouseButton::Left),
            modifiers: KeyModifiers::none(),
        });
        let mut nav = NavBindings::default();
        assert_eq!(nav.action_for_event(&wheel), Some(NavAction::ScrollDown));
        assert_eq!(nav.action_for_event(&click), None);
        nav.wheel = false;
        assert_eq!(nav.action_for_event(&wheel), None);
    }

    #[test]
    fn handle_moves_selection_and_repaints() {
        let backend = Arc::new(TestBackend::new(10, 3));
        let screen = Screen::new(backend.clone());
        let w = screen.new_window_with_options(WindowOptions {
            scrollable: true,
            ..WindowOptions::new(Color::White, Color::Black, Color::Black, Color::Yellow)
        });
        w.draw(["one", "two", "three"]).unwrap();

        let nav = NavBindings::default();
        assert!(nav.handle(&w, &Event::key(KeyCode::Down)).unwrap());
        assert!(!nav.handle(&w, &Event::key(KeyCode::Enter)).unwrap());

        assert_eq!(w.selected(), 1);
        assert_eq!(backend.flush_count(), 1);
        let buf = backend.buffer();
        assert_eq!(buf.cell(0, 1).map(|c| c.bg), Some(Color::Yellow));
        assert_eq!(buf.cell(0, 0).map(|c| c.bg), Some(Color::Black));
    }
}

//! A [`Backend`] on a real terminal through `crossterm`.
//!
//! Cells are written into a ratatui [`Buffer`]; `flush` sends only the cells that changed since
//! the previous flush.

use crate::backend::Backend;
use crate::error::BackendError;
use crate::input::Event;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use ::crossterm::cursor;
use ::crossterm::event;
use ::crossterm::terminal;
use ratatui::backend::Backend as _;
use ratatui::backend::CrosstermBackend as Output;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use std::io;
use std::io::Stdout;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

struct Frame {
    current: Buffer,
    previous: Buffer,
    out: Output<Stdout>,
}

/// Owns the terminal for its lifetime: raw mode and the alternate screen are entered by
/// [`CrosstermBackend::new`] and restored on drop.
pub struct CrosstermBackend {
    frame: Mutex<Frame>,
}

impl CrosstermBackend {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        ::crossterm::execute!(
            stdout,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide
        )?;
        let area = Rect::new(0, 0, width, height);
        tracing::debug!(width, height, "terminal entered raw mode");
        Ok(Self {
            frame: Mutex::new(Frame {
                current: Buffer::empty(area),
                previous: Buffer::empty(area),
                out: Output::new(stdout),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Frame> {
        self.frame.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resize(&self, width: u16, height: u16) -> Result<(), BackendError> {
        let area = Rect::new(0, 0, width, height);
        let mut frame = self.lock();
        frame.current.resize(area);
        // Whatever was on screen is gone after a resize; repaint everything on the next flush.
        frame.previous = Buffer::empty(area);
        frame.out.clear()?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = ::crossterm::execute!(
            io::stdout(),
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );
    }
}

impl Backend for CrosstermBackend {
    fn clear(&self, fg: Color, bg: Color) -> Result<(), BackendError> {
        let mut frame = self.lock();
        let area = frame.current.area;
        frame.current.reset();
        frame.current.set_style(area, Style::default().fg(fg).bg(bg));
        Ok(())
    }

    fn set_cell(&self, x: u16, y: u16, ch: char, fg: Color, bg: Color) {
        let mut frame = self.lock();
        if let Some(cell) = frame.current.cell_mut((x, y)) {
            cell.set_char(ch).set_fg(fg).set_bg(bg);
        }
    }

    fn size(&self) -> (u16, u16) {
        let area = self.lock().current.area;
        (area.width, area.height)
    }

    fn poll_event(&self) -> Event {
        loop {
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(err) => return Event::Error(err.into()),
            };
            let Some(ev) = event_from_crossterm(ev) else {
                continue;
            };
            if let Event::Resize { width, height } = ev {
                if let Err(err) = self.resize(width, height) {
                    return Event::Error(err);
                }
            }
            return ev;
        }
    }

    fn flush(&self) -> Result<(), BackendError> {
        let mut frame = self.lock();
        let Frame {
            current,
            previous,
            out,
        } = &mut *frame;
        let updates = previous.diff(current);
        out.draw(updates.into_iter())?;
        ratatui::backend::Backend::flush(out)?;
        *previous = current.clone();
        Ok(())
    }
}

/// Converts a crossterm event, dropping key releases and repeats, keys no window reacts to,
/// focus changes, and mouse movement without a button.
pub fn event_from_crossterm(ev: event::Event) -> Option<Event> {
    match ev {
        event::Event::Key(key) if key.kind == event::KeyEventKind::Press => {
            KeyEvent::try_from(key).ok().map(Event::Key)
        }
        event::Event::Mouse(m) => MouseEvent::try_from(m).ok().map(Event::Mouse),
        event::Event::Paste(text) => Some(Event::Paste(text)),
        event::Event::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}

impl TryFrom<event::KeyEvent> for KeyEvent {
    type Error = event::KeyCode;

    fn try_from(key: event::KeyEvent) -> Result<Self, Self::Error> {
        let code = match key.code {
            event::KeyCode::Char(c) => KeyCode::Char(c),
            event::KeyCode::Up => KeyCode::Up,
            event::KeyCode::Down => KeyCode::Down,
            event::KeyCode::Enter => KeyCode::Enter,
            event::KeyCode::Tab => KeyCode::Tab,
            event::KeyCode::Esc => KeyCode::Esc,
            other => return Err(other),
        };
        Ok(Self {
            code,
            modifiers: key.modifiers.into(),
        })
    }
}

impl TryFrom<event::MouseEvent> for MouseEvent {
    type Error = event::MouseEventKind;

    fn try_from(m: event::MouseEvent) -> Result<Self, Self::Error> {
        let kind = match m.kind {
            event::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
            event::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
            event::MouseEventKind::Down(b) => MouseEventKind::Down(b.into()),
            event::MouseEventKind::Up(b) => MouseEventKind::Up(b.into()),
            event::MouseEventKind::Drag(b) => MouseEventKind::Drag(b.into()),
            other => return Err(other),
        };
        Ok(Self {
            x: m.column,
            y: m.row,
            kind,
            modifiers: m.modifiers.into(),
        })
    }
}

impl From<event::KeyModifiers> for KeyModifiers {
    fn from(m: event::KeyModifiers) -> Self {
        Self {
            shift: m.contains(event::KeyModifiers::SHIFT),
            ctrl: m.contains(event::KeyModifiers::CONTROL),
            alt: m.contains(event::KeyModifiers::ALT),
        }
    }
}

impl From<event::MouseButton> for MouseButton {
    fn from(b: event::MouseButton) -> Self {
        match b {
            event::MouseButton::Left => Self::Left,
            event::MouseButton::Right => Self::Right,
            event::MouseButton::Middle => Self::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_and_press_events_convert() {
        let ev = event_from_crossterm(event::Event::Resize(80, 24));
        assert!(matches!(
            ev,
            Some(Event::Resize {
                width: 80,
                height: 24
            })
        ));

        let press = event::KeyEvent::new(event::KeyCode::Char('j'), event::KeyModifiers::CONTROL);
        match event_from_crossterm(event::Event::Key(press)) {
            Some(Event::Key(k)) => {
                assert_eq!(k.code, KeyCode::Char('j'));
                assert!(k.modifiers.ctrl);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn releases_and_unknown_keys_are_dropped() {
        let mut release = event::KeyEvent::new(event::KeyCode::Up, event::KeyModifiers::NONE);
        release.kind = event::KeyEventKind::Release;
        assert!(event_from_crossterm(event::Event::Key(release)).is_none());

        for code in [event::KeyCode::F(1), event::KeyCode::PageDown, event::KeyCode::Home] {
            let key = event::KeyEvent::new(code, event::KeyModifiers::NONE);
            assert_eq!(KeyEvent::try_from(key), Err(code));
            assert!(event_from_crossterm(event::Event::Key(key)).is_none());
        }
        assert!(event_from_crossterm(event::Event::FocusGained).is_none());
    }

    #[test]
    fn wheel_converts_and_bare_motion_is_dropped() {
        let mouse = |kind| event::MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: event::KeyModifiers::SHIFT,
        };
        match event_from_crossterm(event::Event::Mouse(mouse(event::MouseEventKind::ScrollUp))) {
            Some(Event::Mouse(m)) => {
                assert_eq!((m.x, m.y, m.kind), (3, 4, MouseEventKind::ScrollUp));
                assert!(m.modifiers.shift);
            }
            other => panic!("unexpected: {other:?}"),
        }
        let moved = mouse(event::MouseEventKind::Moved);
        assert!(event_from_crossterm(event::Event::Mouse(moved)).is_none());
    }
}

//! Terminal backends.
//!
//! The core never talks to a terminal directly. Everything goes through [`Backend`], which keeps
//! raw mode, the physical cell buffer and OS input polling out of the window logic.

use crate::error::BackendError;
use crate::input::Event;
use ratatui::style::Color;
use std::sync::Arc;

/// The capability a terminal must provide to host windows.
///
/// Methods take `&self`: a backend is shared by every window of a [`crate::screen::Screen`] and by
/// the dispatch loop, so implementors synchronize internally. `poll_event` is expected to block;
/// it must not hold any lock that `clear`/`set_cell`/`flush` need while it waits.
pub trait Backend: Send + Sync {
    /// Resets every cell to a blank with the given colors.
    fn clear(&self, fg: Color, bg: Color) -> Result<(), BackendError>;

    /// Writes one character. Out-of-bounds writes are ignored by the backend.
    fn set_cell(&self, x: u16, y: u16, ch: char, fg: Color, bg: Color);

    /// Current terminal size as `(width, height)` in cells.
    fn size(&self) -> (u16, u16);

    /// Blocks until the next event is available.
    fn poll_event(&self) -> Event;

    /// Pushes the cell buffer to the physical screen.
    fn flush(&self) -> Result<(), BackendError>;
}

pub type SharedBackend = Arc<dyn Backend>;

#[cfg(feature = "crossterm")]
pub mod crossterm;

//! Scrollable, selectable text windows that share one terminal.
//!
//! This is the facade over `termwin-core`. Enable the `crossterm` feature for a real terminal
//! backend; [`backend::test::TestBackend`] works everywhere.

pub use termwin_core::backend;
pub use termwin_core::dispatch;
pub use termwin_core::error;
pub use termwin_core::input;
pub use termwin_core::nav;
pub use termwin_core::row;
pub use termwin_core::screen;
pub use termwin_core::window;

pub use termwin_core::BackendError;
pub use termwin_core::Error;
pub use termwin_core::Result;

pub use ratatui::style::Color;

pub mod prelude {
    pub use crate::Color;
    pub use crate::backend::Backend;
    pub use crate::dispatch::Dispatcher;
    pub use crate::dispatch::LoopControl;
    pub use crate::input::Event;
    pub use crate::input::KeyCode;
    pub use crate::nav::NavBindings;
    pub use crate::row::Row;
    pub use crate::screen::Screen;
    pub use crate::window::Window;
    pub use crate::window::WindowOptions;
}

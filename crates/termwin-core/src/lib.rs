//! `termwin-core` turns lists of text rows and a stream of terminal events into scrollable,
//! selectable windows that share one terminal.
//!
//! ## Pieces
//!
//! - [`backend::Backend`]: the terminal capability (clear, set a cell, size, poll, flush).
//!   [`backend::test::TestBackend`] is headless; `backend::crossterm` (feature `crossterm`)
//!   drives a real terminal.
//! - [`window::Window`]: rows, selection, scrolling and the redraw algorithm.
//! - [`screen::Screen`]: the registry of windows and the single focus pointer.
//! - [`dispatch::Dispatcher`]: the loop that routes backend events to the focused window.
//!
//! ## Getting started
//!
//! ```
//! use std::sync::Arc;
//! use termwin_core::backend::test::TestBackend;
//! use termwin_core::nav::NavBindings;
//! use termwin_core::screen::Screen;
//! use termwin_core::window::WindowOptions;
//!
//! let backend = Arc::new(TestBackend::new(20, 5));
//! let screen = Screen::new(backend.clone());
//! let list = screen.new_window_with_options(WindowOptions {
//!     scrollable: true,
//!     ..WindowOptions::default()
//! });
//! list.draw(["alpha", "beta", "gamma"])?;
//!
//! let nav = NavBindings::default();
//! list.set_event_handler(move |w, ev| {
//!     let _ = nav.handle(w, ev);
//! });
//! # Ok::<(), termwin_core::Error>(())
//! ```
//!
//! ## Threads
//!
//! Every window method locks that window, so windows may be fed from other threads while the
//! dispatch loop runs. Event handlers run on the loop thread, one event at a time.

pub mod backend;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod nav;
pub mod row;
pub mod screen;
pub mod window;

pub use error::BackendError;
pub use error::Error;
pub use error::Result;

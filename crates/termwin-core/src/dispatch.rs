//! The event dispatch loop.
//!
//! A [`Dispatcher`] pulls events from the screen's backend one at a time and hands each to the
//! focused window: resize events redraw a window with `auto_resize` set, everything else goes to
//! the window's event handler. Handlers run synchronously on the loop thread, so one event is
//! fully handled before the next is polled.
//!
//! Backend failures (an error event, or a failed redraw/flush after a resize) are routed to the
//! fatal-error callback, which decides whether the loop keeps going.

use crate::error::Error;
use crate::error::Result;
use crate::input::Event;
use crate::screen::Screen;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// What [`Dispatcher::dispatch`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatched {
    /// The focused window was redrawn and the backend flushed.
    Redrawn,
    /// The focused window's handler ran.
    Handled,
    /// No window is focused, or the focused window has no handler.
    Ignored,
}

/// Asks a running loop to return. Checked after each event, so a loop blocked in
/// `poll_event` stops once the next event arrives.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub type FatalHandler = Box<dyn FnMut(&Error) -> LoopControl + Send>;

pub struct Dispatcher {
    screen: Screen,
    on_fatal: FatalHandler,
    stop: StopHandle,
}

impl Dispatcher {
    /// A dispatcher that stops on the first fatal error.
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            on_fatal: Box::new(|_| LoopControl::Stop),
            stop: StopHandle::default(),
        }
    }

    /// Sets the policy for backend failures.
    pub fn on_fatal(mut self, f: impl FnMut(&Error) -> LoopControl + Send + 'static) -> Self {
        self.on_fatal = Box::new(f);
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Routes a single event. Errors are the fatal kind; they are not passed to the fatal
    /// callback here.
    pub fn dispatch(&mut self, event: Event) -> Result<Dispatched> {
        if let Event::Error(err) = event {
            return Err(err.into());
        }

        let Some(window) = self.screen.focused() else {
            tracing::trace!(?event, "no focused window, event dropped");
            return Ok(Dispatched::Ignored);
        };

        if event.is_resize() && window.auto_resize() {
            window.redraw()?;
            self.screen.backend().flush()?;
            tracing::trace!(?event, "focused window redrawn after resize");
            return Ok(Dispatched::Redrawn);
        }

        if window.handle_event(&event) {
            Ok(Dispatched::Handled)
        } else {
            Ok(Dispatched::Ignored)
        }
    }

    /// Polls and dispatches until stopped.
    ///
    /// Returns `Ok(())` once the [`StopHandle`] fires, or the error that made the fatal callback
    /// answer [`LoopControl::Stop`].
    pub fn run(&mut self) -> Result<()> {
        let backend = self.screen.backend().clone();
        loop {
            if self.stop.is_stopped() {
                tracing::debug!("dispatch loop stopped");
                return Ok(());
            }

            let event = backend.poll_event();
            let Err(err) = self.dispatch(event) else {
                continue;
            };

            match (self.on_fatal)(&err) {
                LoopControl::Continue => {
                    tracing::warn!(error = %err, "backend failure ignored, dispatch continues");
                }
                LoopControl::Stop => {
                    tracing::error!(error = %err, "backend failure, dispatch loop aborted");
                    return Err(err);
                }
            }
        }
    }
}

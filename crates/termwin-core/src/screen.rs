//! The window registry and focus pointer shared by everything on one terminal.

use crate::backend::SharedBackend;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::window::Window;
use crate::window::WindowOptions;
use ratatui::style::Color;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::Weak;

pub(crate) struct ScreenShared {
    backend: SharedBackend,
    registry: Mutex<Registry>,
}

#[derive(Default)]
struct Registry {
    windows: Vec<Arc<Window>>,
    focused: Option<Weak<Window>>,
}

/// An ordered set of windows sharing one backend, with exactly one of them focused.
///
/// `Screen` is a cheap handle; clones refer to the same registry. The registry lock only guards
/// the window list and the focus pointer, never window contents.
#[derive(Clone)]
pub struct Screen {
    shared: Arc<ScreenShared>,
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("windows", &self.len())
            .finish_non_exhaustive()
    }
}

impl Screen {
    pub fn new(backend: SharedBackend) -> Self {
        Self {
            shared: Arc::new(ScreenShared {
                backend,
                registry: Mutex::new(Registry::default()),
            }),
        }
    }

    pub(crate) fn from_shared(shared: Arc<ScreenShared>) -> Self {
        Self { shared }
    }

    pub fn backend(&self) -> &SharedBackend {
        &self.shared.backend
    }

    /// Creates a window with the given palette, registers it, and focuses it.
    pub fn new_window(&self, fg: Color, bg: Color, row_fg: Color, row_bg: Color) -> Arc<Window> {
        self.new_window_with_options(WindowOptions::new(fg, bg, row_fg, row_bg))
    }

    pub fn new_window_with_options(&self, opts: WindowOptions) -> Arc<Window> {
        let mut registry = self.lock();
        let window = Arc::new(Window::new(
            opts,
            self.shared.backend.clone(),
            Arc::downgrade(&self.shared),
        ));
        registry.windows.push(window.clone());
        registry.focused = Some(Arc::downgrade(&window));
        tracing::debug!(windows = registry.windows.len(), "window created and focused");
        window
    }

    /// Routes subsequent events to `window`.
    ///
    /// `window` is expected to belong to this screen; membership is not checked. Focusing a
    /// foreign window works until that window is dropped, after which nothing is focused.
    pub fn focus(&self, window: &Arc<Window>) {
        let mut registry = self.lock();
        registry.focused = Some(Arc::downgrade(window));
        tracing::debug!("focus changed");
    }

    pub fn focused(&self) -> Option<Arc<Window>> {
        self.lock().focused.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_focused(&self, window: &Arc<Window>) -> bool {
        self.lock()
            .focused
            .as_ref()
            .is_some_and(|w| Weak::ptr_eq(w, &Arc::downgrade(window)))
    }

    /// Registered windows in creation order.
    pub fn windows(&self) -> Vec<Arc<Window>> {
        self.lock().windows.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the dispatch loop on the current thread with the default fatal-error policy
    /// (stop and return the error).
    pub fn run(&self) -> Result<()> {
        Dispatcher::new(self.clone()).run()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.shared
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test::TestBackend;
    use std::thread;

    fn screen() -> Screen {
        Screen::new(Arc::new(TestBackend::new(20, 5)))
    }

    #[test]
    fn new_window_registers_and_focuses() {
        let s = screen();
        assert!(s.is_empty());
        assert!(s.focused().is_none());

        let a = s.new_window(Color::White, Color::Black, Color::Black, Color::White);
        assert!(s.is_focused(&a));
        let b = s.new_window(Color::White, Color::Black, Color::Black, Color::White);
        assert!(s.is_focused(&b));
        assert!(!s.is_focused(&a));

        let windows = s.windows();
        assert_eq!(windows.len(), 2);
        assert!(Arc::ptr_eq(&windows[0], &a));
        assert!(Arc::ptr_eq(&windows[1], &b));
    }

    #[test]
    fn focus_reassigns_pointer() {
        let s = screen();
        let a = s.new_window_with_options(WindowOptions::default());
        let _b = s.new_window_with_options(WindowOptions::default());
        s.focus(&a);
        assert!(s.focused().is_some_and(|w| Arc::ptr_eq(&w, &a)));
    }

    #[test]
    fn window_can_focus_itself_through_back_reference() {
        let s = screen();
        let a = s.new_window_with_options(WindowOptions::default());
        let _b = s.new_window_with_options(WindowOptions::default());
        assert!(a.focus());
        assert!(s.is_focused(&a));
        assert_eq!(a.screen().map(|s| s.len()), Some(2));
    }

    #[test]
    fn foreign_window_focus_is_not_validated() {
        let s = screen();
        let _a = s.new_window_with_options(WindowOptions::default());
        let other = screen();
        let foreign = other.new_window_with_options(WindowOptions::default());

        s.focus(&foreign);
        assert!(s.is_focused(&foreign));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn concurrent_new_window_leaves_one_registered_focus() {
        let s = screen();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let s = s.clone();
                thread::spawn(move || s.new_window_with_options(WindowOptions::default()))
            })
            .collect();
        let created: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(s.len(), 8);
        let focused = s.focused().unwrap();
        assert!(created.iter().any(|w| Arc::ptr_eq(w, &focused)));
        // The last registration is the one that holds focus.
        assert!(Arc::ptr_eq(s.windows().last().unwrap(), &focused));
    }
}

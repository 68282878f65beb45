//! The per-window render, selection and scroll engine.
//!
//! A [`Window`] owns a list of [`Row`]s and draws the part of it that fits on the terminal,
//! starting at its scroll offset. One visible line is "selected" and drawn with the row's own
//! colors; every other line uses the window defaults.
//!
//! All state lives behind the window's own mutex, including selection and scrolling, so any
//! method may be called from any thread. None of the selection/scroll mutators redraw: call
//! [`Window::redraw`] (and flush the backend) once the state looks the way you want.

use crate::backend::SharedBackend;
use crate::error::Error;
use crate::error::Result;
use crate::input::Event;
use crate::nav::NavBindings;
use crate::row::Row;
use crate::screen::Screen;
use crate::screen::ScreenShared;
use ratatui::style::Color;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::Weak;

/// Construction options for a [`Window`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowOptions {
    pub fg: Color,
    pub bg: Color,
    /// Colors given to every row by [`Window::draw`], shown while the row is selected.
    pub row_fg: Color,
    pub row_bg: Color,
    /// Top-left cell where the first visible row is drawn.
    pub origin: (u16, u16),
    pub scrollable: bool,
    /// Redraw automatically when the dispatch loop sees a resize while this window is focused.
    pub auto_resize: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
            row_fg: Color::Black,
            row_bg: Color::White,
            origin: (0, 0),
            scrollable: false,
            auto_resize: true,
        }
    }
}

impl WindowOptions {
    pub fn new(fg: Color, bg: Color, row_fg: Color, row_bg: Color) -> Self {
        Self {
            fg,
            bg,
            row_fg,
            row_bg,
            ..Self::default()
        }
    }
}

pub type EventHandler = Box<dyn FnMut(&Window, &Event) + Send>;

struct WindowState {
    opts: WindowOptions,
    rows: Vec<Row>,
    /// Selected line, relative to `scroll_offset`.
    selected: usize,
    scroll_offset: usize,
}

#[derive(Default)]
struct HandlerSlot {
    handler: Option<EventHandler>,
    generation: u64,
}

pub struct Window {
    state: Mutex<WindowState>,
    handler: Mutex<HandlerSlot>,
    backend: SharedBackend,
    screen: Weak<ScreenShared>,
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Window")
            .field("opts", &state.opts)
            .field("rows", &state.rows.len())
            .field("selected", &state.selected)
            .field("scroll_offset", &state.scroll_offset)
            .finish_non_exhaustive()
    }
}

impl Window {
    pub(crate) fn new(
        opts: WindowOptions,
        backend: SharedBackend,
        screen: Weak<ScreenShared>,
    ) -> Self {
        Self {
            state: Mutex::new(WindowState {
                opts,
                rows: Vec::new(),
                selected: 0,
                scroll_offset: 0,
            }),
            handler: Mutex::new(HandlerSlot::default()),
            backend,
            screen,
        }
    }

    /// The screen this window was created on, if it is still alive.
    pub fn screen(&self) -> Option<Screen> {
        self.screen.upgrade().map(Screen::from_shared)
    }

    /// Makes this window the focus target of its screen. Returns `false` if the screen is gone.
    pub fn focus(self: &Arc<Self>) -> bool {
        match self.screen() {
            Some(screen) => {
                screen.focus(self);
                true
            }
            None => false,
        }
    }

    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }

    pub fn options(&self) -> WindowOptions {
        self.lock().opts
    }

    /// Replaces all rows with `lines`, resets selection and scrolling, and redraws.
    ///
    /// Each new row takes the window's `row_fg`/`row_bg` colors.
    pub fn draw<I, S>(&self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.lock();
        let (fg, bg) = (state.opts.row_fg, state.opts.row_bg);
        state.rows = lines.into_iter().map(|l| Row::new(l, fg, bg)).collect();
        state.selected = 0;
        state.scroll_offset = 0;
        tracing::trace!(rows = state.rows.len(), "window draw");
        self.redraw_locked(&state)
    }

    /// Clears the backend and paints the visible rows.
    ///
    /// Characters past the right edge and rows past the bottom edge are skipped; the stored rows
    /// are left untouched. The backend is not flushed.
    pub fn redraw(&self) -> Result<()> {
        let state = self.lock();
        self.redraw_locked(&state)
    }

    fn redraw_locked(&self, state: &WindowState) -> Result<()> {
        let opts = &state.opts;
        self.backend.clear(opts.fg, opts.bg)?;
        let (width, height) = self.backend.size();
        let (origin_x, origin_y) = opts.origin;

        let visible = state.rows.get(state.scroll_offset..).unwrap_or_default();
        let mut y = origin_y;
        for (i, row) in visible.iter().enumerate() {
            if y >= height {
                break;
            }
            let (fg, bg) = if i == state.selected {
                (row.fg, row.bg)
            } else {
                (opts.fg, opts.bg)
            };
            let mut x = origin_x;
            for ch in row.text.chars() {
                if x >= width {
                    break;
                }
                self.backend.set_cell(x, y, ch, fg, bg);
                x += 1;
            }
            y += 1;
        }
        tracing::trace!(
            scroll_offset = state.scroll_offset,
            selected = state.selected,
            width,
            height,
            "window redraw"
        );
        Ok(())
    }

    /// A copy of every row.
    pub fn rows(&self) -> Vec<Row> {
        self.lock().rows.clone()
    }

    pub fn row_count(&self) -> usize {
        self.lock().rows.len()
    }

    /// Selected line, relative to the scroll offset.
    pub fn selected(&self) -> usize {
        self.lock().selected
    }

    pub fn scroll_offset(&self) -> usize {
        self.lock().scroll_offset
    }

    /// The row under the selection (`selected + scroll_offset`), if there is one.
    pub fn current_row(&self) -> Option<Row> {
        let state = self.lock();
        current_index(&state).and_then(|i| state.rows.get(i).cloned())
    }

    /// Runs `f` on the row under the selection while holding the window lock.
    pub fn with_current_row<R>(&self, f: impl FnOnce(&mut Row) -> R) -> Option<R> {
        let mut state = self.lock();
        let i = current_index(&state)?;
        state.rows.get_mut(i).map(f)
    }

    /// Moves the selection down one row.
    ///
    /// When not scrollable there is no upper bound: the selection can move past the last row,
    /// in which case nothing is highlighted. When scrollable, the selection stops at the last row
    /// and scrolls the viewport instead once it reaches the bottom line of the terminal.
    pub fn next_row(&self) {
        let mut state = self.lock();
        if !state.opts.scrollable {
            state.selected = state.selected.saturating_add(1);
            return;
        }
        let len = state.rows.len();
        let at_last = current_index(&state).is_none_or(|i| i.saturating_add(1) >= len);
        if at_last {
            return;
        }
        let (_, height) = self.backend.size();
        let lines = height.saturating_sub(state.opts.origin.1) as usize;
        if state.selected.saturating_add(1) >= lines {
            scroll_down(&mut state);
        } else {
            state.selected += 1;
        }
    }

    /// Moves the selection up one row, scrolling up first when scrollable and already at the
    /// top line. Never goes below zero.
    pub fn prev_row(&self) {
        let mut state = self.lock();
        if state.opts.scrollable && state.selected == 0 {
            scroll_up(&mut state);
        } else {
            state.selected = state.selected.saturating_sub(1);
        }
    }

    pub fn scroll_up(&self) {
        scroll_up(&mut self.lock());
    }

    /// Advances the scroll offset by one. Not bounded by the row count: scrolling past the end
    /// leaves an empty viewport.
    pub fn scroll_down(&self) {
        scroll_down(&mut self.lock());
    }

    /// Whether [`Window::next_row`] and [`Window::prev_row`] scroll the viewport.
    pub fn set_scrollable(&self, enabled: bool) {
        self.lock().opts.scrollable = enabled;
    }

    pub fn is_scrollable(&self) -> bool {
        self.lock().opts.scrollable
    }

    pub fn set_auto_resize(&self, enabled: bool) {
        self.lock().opts.auto_resize = enabled;
    }

    pub fn auto_resize(&self) -> bool {
        self.lock().opts.auto_resize
    }

    /// Recolors row `index`. Only visible while the row is selected.
    pub fn mark_row(&self, index: usize, fg: Color, bg: Color) -> Result<()> {
        recolor_row(&mut self.lock(), index, fg, bg)
    }

    /// Restores row `index` to the window's default colors.
    pub fn unmark_row(&self, index: usize) -> Result<()> {
        let mut state = self.lock();
        let (fg, bg) = (state.opts.fg, state.opts.bg);
        recolor_row(&mut state, index, fg, bg)
    }

    /// Applies the navigation action `bindings` map `event` to, then redraws and flushes.
    ///
    /// Returns `false` without touching the terminal when the event is not a navigation input.
    pub fn handle_nav_event(&self, bindings: &NavBindings, event: &Event) -> Result<bool> {
        bindings.handle(self, event)
    }

    /// Installs the callback the dispatch loop invokes for events routed to this window.
    ///
    /// The handler runs on the dispatch thread and receives the window itself, so it can call
    /// any window method (including replacing its own handler).
    pub fn set_event_handler(&self, handler: impl FnMut(&Window, &Event) + Send + 'static) {
        let mut slot = self.lock_handler();
        slot.handler = Some(Box::new(handler));
        slot.generation += 1;
    }

    pub fn clear_event_handler(&self) {
        let mut slot = self.lock_handler();
        slot.handler = None;
        slot.generation += 1;
    }

    pub fn has_event_handler(&self) -> bool {
        self.lock_handler().handler.is_some()
    }

    /// Invokes the event handler, if any. Returns whether one ran.
    pub(crate) fn handle_event(&self, event: &Event) -> bool {
        let (mut handler, generation) = {
            let mut slot = self.lock_handler();
            match slot.handler.take() {
                Some(h) => (h, slot.generation),
                None => return false,
            }
        };

        // The slot lock is released so the handler can touch its own window freely.
        handler(self, event);

        let mut slot = self.lock_handler();
        if slot.generation == generation {
            slot.handler = Some(handler);
        }
        true
    }

    fn lock(&self) -> MutexGuard<'_, WindowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_handler(&self) -> MutexGuard<'_, HandlerSlot> {
        self.handler.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn current_index(state: &WindowState) -> Option<usize> {
    state.selected.checked_add(state.scroll_offset)
}

fn recolor_row(state: &mut WindowState, index: usize, fg: Color, bg: Color) -> Result<()> {
    let len = state.rows.len();
    let row = state
        .rows
        .get_mut(index)
        .ok_or(Error::RowIndexOutOfRange { index, len })?;
    row.fg = fg;
    row.bg = bg;
    Ok(())
}

fn scroll_up(state: &mut WindowState) {
    state.scroll_offset = state.scroll_offset.saturating_sub(1);
}

fn scroll_down(state: &mut WindowState) {
    state.scroll_offset = state.scroll_offset.saturating_add(1);
}

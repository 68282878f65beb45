//! Two full-screen windows on one terminal. `j`/`k` or arrows move, `Tab` switches window,
//! `m` marks the current row, `q` quits. Logs go to stderr (`RUST_LOG=termwin_core=trace`).

use std::sync::Arc;
use std::sync::Weak;
use termwin::backend::crossterm::CrosstermBackend;
use termwin::dispatch::StopHandle;
use termwin::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let backend = Arc::new(CrosstermBackend::new()?);
    let screen = Screen::new(backend.clone());

    let options = WindowOptions {
        scrollable: true,
        ..WindowOptions::new(Color::Reset, Color::Reset, Color::Black, Color::Cyan)
    };
    let files = screen.new_window_with_options(options);
    let numbers = screen.new_window_with_options(WindowOptions {
        row_bg: Color::Yellow,
        ..options
    });

    let mut dispatcher = Dispatcher::new(screen.clone());
    let stop = dispatcher.stop_handle();

    install_handler(&files, Arc::downgrade(&numbers), stop.clone());
    install_handler(&numbers, Arc::downgrade(&files), stop);

    numbers.draw((1..=500).map(|n| format!("{n:>4}  {}", n * n)))?;
    let entries = std::fs::read_dir(".")?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned());
    files.draw(entries)?;
    files.focus();
    files.redraw()?;
    backend.flush()?;

    // The backend restores the terminal once the last window holding it is dropped.
    dispatcher.run()?;
    Ok(())
}

fn install_handler(window: &Arc<Window>, other: Weak<Window>, stop: StopHandle) {
    let nav = NavBindings::default();
    window.set_event_handler(move |w, ev| {
        let Some(key) = ev.as_key() else {
            if let Err(err) = w.handle_nav_event(&nav, ev) {
                tracing::warn!(error = %err, "redraw failed");
            }
            return;
        };
        let res = match key.code {
            KeyCode::Char('q') => {
                stop.stop();
                Ok(())
            }
            KeyCode::Tab => match other.upgrade() {
                Some(other) => {
                    other.focus();
                    other
                        .redraw()
                        .and_then(|()| other.backend().flush().map_err(Into::into))
                }
                None => Ok(()),
            },
            KeyCode::Char('m') => {
                let index = w.selected() + w.scroll_offset();
                w.mark_row(index, Color::White, Color::Magenta)
                    .and_then(|()| w.redraw())
                    .and_then(|()| w.backend().flush().map_err(Into::into))
            }
            _ => w.handle_nav_event(&nav, ev).map(|_| ()),
        };
        if let Err(err) = res {
            tracing::warn!(error = %err, "event handling failed");
        }
    });
}

//! The terminal event loop.
//!
//! Key presses come from an [`EventSource`] so the loop can be driven by
//! scripted input as well as by the real terminal.

use crate::application::App;
use crate::infrastructure::Ticker;
use crate::presentation::{InputHandler, render_ui};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Longest wait for input while no countdown is running.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// Something that yields key presses.
pub trait EventSource {
    /// Waits up to `timeout` for the next key press.
    ///
    /// Returns `Ok(None)` when the timeout elapsed without one.
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
}

/// Key presses read from the crossterm terminal.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }
}

/// Main application event loop.
///
/// Waits for key presses no longer than the time until the next countdown
/// tick, then feeds whole elapsed ticks to the application. Returns when the
/// user quits.
///
/// # Errors
///
/// Returns an IO error if drawing or reading input fails.
pub fn run_app<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut E,
    tick_interval: Duration,
) -> io::Result<()> {
    let mut ticker = Ticker::new(tick_interval, Instant::now());

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        let timeout = if app.is_ticking() {
            ticker.time_until_next(Instant::now())
        } else {
            IDLE_POLL
        };

        if let Some(key) = events.next_key(timeout)? {
            if InputHandler::is_quit(app, key.code, key.modifiers) {
                debug!("quit requested");
                return Ok(());
            }
            InputHandler::handle_key_event(app, key.code, key.modifiers);
        }

        app.advance(ticker.step(app.is_ticking(), Instant::now()));
    }
}

//! Terminal User Interface for studylog.
//!
//! Hosts the live session timer. Built with ratatui and crossterm; the
//! 1-second tick is derived from the event-poll timeout and is only armed
//! while the timer is running.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::Config;
use crate::error::StudylogError;
use crate::storage::{JsonStore, SessionStore};

/// Interval between timer ticks.
const TICK_RATE: Duration = Duration::from_secs(1);

/// Poll timeout while the clock is not advancing.
const IDLE_POLL: Duration = Duration::from_millis(200);

/// Run the timer screen.
///
/// # Errors
///
/// Returns an error if the terminal cannot be initialized or the session log
/// cannot be loaded.
pub fn run(config: &Config, initial_topic: Option<String>) -> Result<(), StudylogError> {
    let store = JsonStore::new()?;
    let mut app = App::new(store, config.timer.recent_sessions, initial_topic)?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| StudylogError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| StudylogError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| StudylogError::Config(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main loop: draw, wait for a key or the next tick, repeat.
fn run_app<B: Backend, S: SessionStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<(), StudylogError> {
    let mut last_tick = Instant::now();

    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| StudylogError::Config(format!("Failed to draw: {e}")))?;

        // While running, wait out the remainder of the current second;
        // otherwise the tick is disarmed and we just poll for keys.
        let timeout = if app.is_running() {
            TICK_RATE.saturating_sub(last_tick.elapsed())
        } else {
            IDLE_POLL
        };

        if let Some(action) = event::handle_events(app, timeout)? {
            match action {
                event::Action::Quit => break,
                event::Action::Start => app.start(),
                event::Action::Toggle => app.toggle(),
                event::Action::Finish => app.finish(),
            }
        }

        if app.is_running() {
            if last_tick.elapsed() >= TICK_RATE {
                app.tick();
                last_tick = Instant::now();
            }
        } else {
            // Re-arm so the first tick lands a full second after resuming
            last_tick = Instant::now();
        }
    }

    Ok(())
}

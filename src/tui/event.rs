//! Event handling for the timer screen.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

use crate::error::StudylogError;
use crate::storage::SessionStore;
use crate::tui::app::App;

/// Action to take after handling an event.
pub enum Action {
    /// Quit the timer.
    Quit,
    /// Start a session on the entered topic.
    Start,
    /// Pause or resume the session.
    Toggle,
    /// Finish and record the session.
    Finish,
}

/// Poll for and handle one terminal event.
///
/// Waits up to `timeout` (the remainder of the current tick interval).
/// Topic editing is applied directly to the app; anything that changes the
/// session lifecycle is returned as an [`Action`].
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<S: SessionStore>(
    app: &mut App<S>,
    timeout: Duration,
) -> Result<Option<Action>, StudylogError> {
    if !event::poll(timeout)
        .map_err(|e| StudylogError::Config(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    if let Event::Key(key) = event::read()
        .map_err(|e| StudylogError::Config(format!("Event read failed: {e}")))?
    {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if app.is_active() {
            // A session is in progress: lifecycle keys only
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(Some(Action::Quit)),
                KeyCode::Char(' ') => return Ok(Some(Action::Toggle)),
                KeyCode::Char('f') | KeyCode::Char('F') => return Ok(Some(Action::Finish)),
                _ => {}
            }
        } else {
            // Idle: the keyboard edits the topic line
            match key.code {
                KeyCode::Esc => return Ok(Some(Action::Quit)),
                KeyCode::Enter => return Ok(Some(Action::Start)),
                KeyCode::Backspace => app.backspace(),
                KeyCode::Char(c) => app.push_char(c),
                _ => {}
            }
        }
    }

    Ok(None)
}

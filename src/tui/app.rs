//! Application state for the timer screen.

use crate::error::StudylogError;
use crate::session::{Session, SessionTracker, Stats, TimerState};
use crate::storage::SessionStore;

/// Severity of the status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Neutral information.
    Info,
    /// A session was recorded.
    Success,
    /// Recoverable problem (short session, failed save).
    Warning,
}

/// A transient message shown at the bottom of the screen.
#[derive(Debug, Clone)]
pub struct Status {
    /// Message text.
    pub text: String,
    /// Severity, drives the color.
    pub kind: StatusKind,
}

/// State behind the timer screen: the tracker plus the topic input line.
pub struct App<S: SessionStore> {
    tracker: SessionTracker<S>,
    input: String,
    recent_limit: usize,
    status: Option<Status>,
}

impl<S: SessionStore> App<S> {
    /// Create the app, loading the persisted log through the store.
    ///
    /// # Errors
    ///
    /// Returns an error if persisted data exists but cannot be loaded.
    pub fn new(
        store: S,
        recent_limit: usize,
        initial_topic: Option<String>,
    ) -> Result<Self, StudylogError> {
        Ok(Self {
            tracker: SessionTracker::new(store)?,
            input: initial_topic.unwrap_or_default(),
            recent_limit,
            status: None,
        })
    }

    /// Whether the clock is advancing.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.tracker.timer().is_running()
    }

    /// Whether a session is in progress (running or paused).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.tracker.timer().is_active()
    }

    /// Current timer state.
    #[must_use]
    pub fn timer_state(&self) -> TimerState {
        self.tracker.timer().state()
    }

    /// Elapsed clock as `HH:MM:SS`.
    #[must_use]
    pub fn elapsed(&self) -> String {
        self.tracker.timer().format_elapsed()
    }

    /// Topic being edited (idle) or of the session in progress.
    #[must_use]
    pub fn topic(&self) -> &str {
        if self.is_active() {
            self.tracker.topic()
        } else {
            &self.input
        }
    }

    /// Current statistics, recomputed from the log.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.tracker.stats()
    }

    /// The sessions shown in the recent list.
    #[must_use]
    pub fn recent(&self) -> &[Session] {
        self.tracker.recent(self.recent_limit)
    }

    /// Current status line, if any.
    #[must_use]
    pub const fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Advance the clock by one second.
    pub fn tick(&mut self) {
        self.tracker.tick();
    }

    /// Append a character to the topic input (idle only).
    pub fn push_char(&mut self, c: char) {
        if !self.is_active() {
            self.input.push(c);
            self.status = None;
        }
    }

    /// Remove the last character from the topic input (idle only).
    pub fn backspace(&mut self) {
        if !self.is_active() {
            self.input.pop();
        }
    }

    /// Start a session on the entered topic.
    pub fn start(&mut self) {
        let topic = self.input.clone();
        match self.tracker.start(&topic) {
            Ok(()) => {
                self.input.clear();
                self.status = Some(Status {
                    text: format!("Session started: {}", self.tracker.topic()),
                    kind: StatusKind::Info,
                });
            }
            Err(e) => {
                self.status = Some(Status {
                    text: e.to_string(),
                    kind: StatusKind::Warning,
                });
            }
        }
    }

    /// Pause or resume the session in progress.
    pub fn toggle(&mut self) {
        match self.tracker.toggle() {
            Ok(state) => {
                self.status = Some(Status {
                    text: format!("Session {state}"),
                    kind: StatusKind::Info,
                });
            }
            Err(e) => {
                self.status = Some(Status {
                    text: e.to_string(),
                    kind: StatusKind::Warning,
                });
            }
        }
    }

    /// Finish and record the session in progress.
    ///
    /// A too-short session leaves the timer exactly as it was; a failed save
    /// keeps the session visible in memory and warns.
    pub fn finish(&mut self) {
        match self.tracker.finish() {
            Ok(finished) => {
                self.status = Some(match finished.persist_error {
                    None => Status {
                        text: format!(
                            "Recorded {}m on {}",
                            finished.session.minutes, finished.session.topic
                        ),
                        kind: StatusKind::Success,
                    },
                    Some(e) => Status {
                        text: format!(
                            "Recorded {}m on {} - but saving failed: {e}",
                            finished.session.minutes, finished.session.topic
                        ),
                        kind: StatusKind::Warning,
                    },
                });
            }
            Err(e) => {
                self.status = Some(Status {
                    text: e.to_string(),
                    kind: StatusKind::Warning,
                });
            }
        }
    }
}

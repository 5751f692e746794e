//! The elapsed-time state machine for a study session.
//!
//! A count-up timer with three states. Elapsed seconds only advance while
//! `Running`, freeze while `Paused`, and reset when a session starts or is
//! finalized. The timer itself is transient and never persisted.

use serde::{Deserialize, Serialize};

/// Timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// No session in progress
    Idle,
    /// Session in progress, clock advancing
    Running,
    /// Session in progress, clock frozen
    Paused,
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

/// A count-up session timer.
#[derive(Debug, Clone)]
pub struct Timer {
    /// Current state
    state: TimerState,
    /// Seconds elapsed while running
    elapsed_seconds: u64,
}

impl Timer {
    /// Create a new idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TimerState::Idle,
            elapsed_seconds: 0,
        }
    }

    /// Begin a new session: reset the clock and start running.
    pub fn start(&mut self) {
        self.elapsed_seconds = 0;
        self.state = TimerState::Running;
    }

    /// Flip between `Running` and `Paused`.
    ///
    /// Has no effect while `Idle`; the caller guards that case. Returns the
    /// state after the toggle.
    pub fn toggle(&mut self) -> TimerState {
        self.state = match self.state {
            TimerState::Running => TimerState::Paused,
            TimerState::Paused => TimerState::Running,
            TimerState::Idle => TimerState::Idle,
        };
        self.state
    }

    /// Advance the clock by one second.
    ///
    /// Only advances while `Running`; returns true if the clock moved. Driven
    /// by the presentation layer's 1-second tick, so the counter never moves
    /// more than once per elapsed wall-clock second.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }

        self.elapsed_seconds += 1;
        true
    }

    /// Return to `Idle` with the clock at zero.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.elapsed_seconds = 0;
    }

    /// Get the current state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Seconds elapsed so far.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Whole minutes elapsed so far (rounded down).
    #[must_use]
    pub const fn elapsed_minutes(&self) -> u64 {
        self.elapsed_seconds / 60
    }

    /// Check if the clock is advancing.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Check if a session is in progress (running or paused).
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, TimerState::Running | TimerState::Paused)
    }

    /// Format the elapsed clock as `HH:MM:SS`.
    #[must_use]
    pub fn format_elapsed(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a second count as `HH:MM:SS`, zero-padded, hours unbounded.
#[must_use]
pub fn format_elapsed(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_starts_idle() {
        let timer = Timer::new();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.elapsed_seconds(), 0);
    }

    #[test]
    fn test_start_resets_clock() {
        let mut timer = Timer::new();
        timer.start();
        for _ in 0..90 {
            timer.tick();
        }
        assert_eq!(timer.elapsed_seconds(), 90);

        timer.start();
        assert_eq!(timer.elapsed_seconds(), 0);
        assert!(timer.is_running());
    }

    #[test]
    fn test_tick_only_advances_while_running() {
        let mut timer = Timer::new();

        // Idle: no movement
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_seconds(), 0);

        timer.start();
        assert!(timer.tick());
        assert_eq!(timer.elapsed_seconds(), 1);

        // Paused: frozen
        timer.toggle();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_seconds(), 1);

        // Resumed: advancing again
        timer.toggle();
        assert!(timer.tick());
        assert_eq!(timer.elapsed_seconds(), 2);
    }

    #[test]
    fn test_toggle_flips_running_and_paused() {
        let mut timer = Timer::new();
        timer.start();

        assert_eq!(timer.toggle(), TimerState::Paused);
        assert_eq!(timer.toggle(), TimerState::Running);
    }

    #[test]
    fn test_toggle_is_noop_while_idle() {
        let mut timer = Timer::new();
        assert_eq!(timer.toggle(), TimerState::Idle);
    }

    #[test]
    fn test_reset() {
        let mut timer = Timer::new();
        timer.start();
        timer.tick();
        timer.reset();

        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.elapsed_seconds(), 0);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(59), "00:00:59");
        assert_eq!(format_elapsed(90), "00:01:30");
        assert_eq!(format_elapsed(3661), "01:01:01");
        // Hours are unbounded past a day
        assert_eq!(format_elapsed(100 * 3600), "100:00:00");
    }
}

//! The session tracker: timer state machine + session log + statistics.
//!
//! Owns the live [`Timer`], the in-memory [`SessionLog`], and a persistence
//! collaborator. The presentation layer issues commands (`start`, `toggle`,
//! `finish`, `tick`) and reads queries (timer, stats, recent sessions); every
//! transition runs to completion before the next command or tick is
//! processed.

use chrono::{DateTime, Local, Utc};

use super::record::{validate_topic, Session, SessionLog};
use super::stats::Stats;
use super::timer::{Timer, TimerState};
use crate::error::StudylogError;
use crate::storage::SessionStore;

/// Outcome of a successful finish.
#[derive(Debug)]
pub struct Finished {
    /// The recorded session.
    pub session: Session,
    /// Set when the log could not be persisted. The session is still in the
    /// in-memory log; the caller decides how to warn or retry.
    pub persist_error: Option<StudylogError>,
}

/// Tracks the live timer and the session log behind it.
pub struct SessionTracker<S: SessionStore> {
    store: S,
    log: SessionLog,
    timer: Timer,
    topic: String,
    last_id: i64,
}

impl<S: SessionStore> SessionTracker<S> {
    /// Create a tracker, loading any previously persisted log.
    ///
    /// A store with nothing persisted yet yields an empty log and zeroed
    /// stats.
    ///
    /// # Errors
    ///
    /// Returns an error if persisted data exists but cannot be loaded.
    pub fn new(store: S) -> Result<Self, StudylogError> {
        let log = store.load()?.unwrap_or_default();
        let last_id = log.max_id().unwrap_or(0);

        Ok(Self {
            store,
            log,
            timer: Timer::new(),
            topic: String::new(),
            last_id,
        })
    }

    /// Start a new session on the given topic.
    ///
    /// Validates and sanitizes the topic, resets the clock to zero, and moves
    /// the timer to `Running`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the topic is empty after trimming, or if a
    /// session is already in progress. No state changes on error.
    pub fn start(&mut self, topic: &str) -> Result<(), StudylogError> {
        if self.timer.is_active() {
            return Err(StudylogError::Validation(format!(
                "cannot start - a session is already {}",
                self.timer.state()
            )));
        }

        self.topic = validate_topic(topic)?;
        self.timer.start();
        Ok(())
    }

    /// Pause a running session or resume a paused one.
    ///
    /// Returns the state after the toggle.
    ///
    /// # Errors
    ///
    /// Returns `Session` if no session is in progress.
    pub fn toggle(&mut self) -> Result<TimerState, StudylogError> {
        if !self.timer.is_active() {
            return Err(StudylogError::Session(
                "no active session to pause or resume".to_string(),
            ));
        }

        Ok(self.timer.toggle())
    }

    /// Advance the clock by one second (no-op unless running).
    pub fn tick(&mut self) {
        self.timer.tick();
    }

    /// Finalize the current session at the present instant.
    ///
    /// # Errors
    ///
    /// See [`SessionTracker::finish_at`].
    pub fn finish(&mut self) -> Result<Finished, StudylogError> {
        self.finish_at(Local::now())
    }

    /// Finalize the current session as of `now`.
    ///
    /// Computes whole minutes from the elapsed clock, records the session at
    /// the front of the log, persists the whole log, and resets the timer to
    /// `Idle` with the topic cleared. A failed save does not roll anything
    /// back; it is reported in [`Finished::persist_error`].
    ///
    /// # Errors
    ///
    /// Returns `Session` if no session is in progress. Returns `TooShort` if
    /// the elapsed time rounds down to zero minutes - the timer keeps its
    /// state and clock so the caller can let the session continue.
    pub fn finish_at(&mut self, now: DateTime<Local>) -> Result<Finished, StudylogError> {
        if !self.timer.is_active() {
            return Err(StudylogError::Session(
                "no active session to finish".to_string(),
            ));
        }

        let elapsed = self.timer.elapsed_seconds();
        let minutes = u32::try_from(elapsed / 60).unwrap_or(u32::MAX);
        if minutes == 0 {
            return Err(StudylogError::TooShort {
                elapsed_seconds: elapsed,
            });
        }

        let session = Session {
            id: self.next_id(now),
            topic: std::mem::take(&mut self.topic),
            minutes,
            date: now.date_naive(),
            timestamp: now.with_timezone(&Utc),
        };

        self.log.push_front(session.clone());
        let persist_error = self.store.save(&self.log).err();
        self.timer.reset();

        Ok(Finished {
            session,
            persist_error,
        })
    }

    /// Allocate the next session id: the finish instant in milliseconds,
    /// bumped past the previous id so ids strictly increase within a run.
    fn next_id(&mut self, now: DateTime<Local>) -> i64 {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    /// Current statistics, recomputed from the log.
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::compute(&self.log, Local::now().date_naive())
    }

    /// The most recent `n` sessions.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[Session] {
        self.log.recent(n)
    }

    /// The live timer.
    #[must_use]
    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Topic of the session in progress (empty while idle).
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The full in-memory log.
    #[must_use]
    pub const fn log(&self) -> &SessionLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockSessionStore;

    fn tracker() -> SessionTracker<MockSessionStore> {
        let mut store = MockSessionStore::new();
        store.expect_load().returning(|| Ok(None));
        store.expect_save().returning(|_| Ok(()));
        SessionTracker::new(store).unwrap()
    }

    fn run_for(tracker: &mut SessionTracker<MockSessionStore>, seconds: u64) {
        for _ in 0..seconds {
            tracker.tick();
        }
    }

    #[test]
    fn test_start_with_empty_topic_fails_without_state_change() {
        let mut t = tracker();

        let err = t.start("   ").unwrap_err();
        assert!(matches!(err, StudylogError::Validation(_)));
        assert_eq!(t.timer().state(), TimerState::Idle);
        assert_eq!(t.stats().total_sessions, 0);
    }

    #[test]
    fn test_start_trims_topic_and_runs() {
        let mut t = tracker();
        t.start("  Math  ").unwrap();

        assert_eq!(t.topic(), "Math");
        assert_eq!(t.timer().state(), TimerState::Running);
        assert_eq!(t.timer().elapsed_seconds(), 0);
    }

    #[test]
    fn test_start_while_active_fails() {
        let mut t = tracker();
        t.start("Math").unwrap();

        assert!(matches!(
            t.start("History"),
            Err(StudylogError::Validation(_))
        ));
        // The running session is untouched
        assert_eq!(t.topic(), "Math");
    }

    #[test]
    fn test_toggle_without_session_fails() {
        let mut t = tracker();
        assert!(matches!(t.toggle(), Err(StudylogError::Session(_))));
    }

    #[test]
    fn test_toggle_freezes_and_resumes_clock() {
        let mut t = tracker();
        t.start("Math").unwrap();
        run_for(&mut t, 10);

        assert_eq!(t.toggle().unwrap(), TimerState::Paused);
        run_for(&mut t, 10);
        assert_eq!(t.timer().elapsed_seconds(), 10);

        assert_eq!(t.toggle().unwrap(), TimerState::Running);
        run_for(&mut t, 5);
        assert_eq!(t.timer().elapsed_seconds(), 15);
    }

    #[test]
    fn test_finish_under_a_minute_keeps_timer_intact() {
        let mut t = tracker();
        t.start("Math").unwrap();
        run_for(&mut t, 59);

        let err = t.finish().unwrap_err();
        assert!(matches!(
            err,
            StudylogError::TooShort { elapsed_seconds: 59 }
        ));

        // Elapsed counter is NOT reset and the session keeps running
        assert_eq!(t.timer().state(), TimerState::Running);
        assert_eq!(t.timer().elapsed_seconds(), 59);
        assert_eq!(t.stats().total_sessions, 0);

        // One more second crosses the threshold
        t.tick();
        let finished = t.finish().unwrap();
        assert_eq!(finished.session.minutes, 1);
    }

    #[test]
    fn test_finish_too_short_while_paused_preserves_paused_state() {
        let mut t = tracker();
        t.start("Math").unwrap();
        run_for(&mut t, 30);
        t.toggle().unwrap();

        assert!(t.finish().is_err());
        assert_eq!(t.timer().state(), TimerState::Paused);
        assert_eq!(t.timer().elapsed_seconds(), 30);
    }

    #[test]
    fn test_finish_minute_boundaries() {
        for (seconds, expected_minutes) in [(60, 1), (119, 1), (120, 2)] {
            let mut t = tracker();
            t.start("Math").unwrap();
            run_for(&mut t, seconds);

            let finished = t.finish().unwrap();
            assert_eq!(finished.session.minutes, expected_minutes);
        }
    }

    #[test]
    fn test_finish_records_and_resets() {
        let mut t = tracker();
        t.start("Math").unwrap();
        run_for(&mut t, 90);

        let finished = t.finish().unwrap();
        assert!(finished.persist_error.is_none());
        assert_eq!(finished.session.topic, "Math");
        assert_eq!(finished.session.minutes, 1);

        assert_eq!(t.timer().state(), TimerState::Idle);
        assert_eq!(t.timer().elapsed_seconds(), 0);
        assert_eq!(t.topic(), "");
        assert_eq!(t.stats().total_sessions, 1);
        assert_eq!(t.stats().total_minutes, 1);
        assert_eq!(t.recent(10)[0].topic, "Math");
    }

    #[test]
    fn test_finish_without_session_fails() {
        let mut t = tracker();
        assert!(matches!(t.finish(), Err(StudylogError::Session(_))));
    }

    #[test]
    fn test_ids_strictly_increase_even_within_one_millisecond() {
        let mut t = tracker();
        let now = Local::now();

        t.start("Math").unwrap();
        run_for(&mut t, 60);
        let first = t.finish_at(now).unwrap().session.id;

        t.start("History").unwrap();
        run_for(&mut t, 60);
        let second = t.finish_at(now).unwrap().session.id;

        assert!(second > first);
    }

    #[test]
    fn test_save_failure_keeps_session_in_memory() {
        let mut store = MockSessionStore::new();
        store.expect_load().returning(|| Ok(None));
        store
            .expect_save()
            .returning(|_| Err(StudylogError::Persistence("disk full".to_string())));

        let mut t = SessionTracker::new(store).unwrap();
        t.start("Math").unwrap();
        run_for(&mut t, 60);

        let finished = t.finish().unwrap();
        assert!(matches!(
            finished.persist_error,
            Some(StudylogError::Persistence(_))
        ));

        // The in-memory log is the source of truth
        assert_eq!(t.stats().total_sessions, 1);
        assert_eq!(t.recent(10).len(), 1);
        assert_eq!(t.timer().state(), TimerState::Idle);
    }

    #[test]
    fn test_new_tracker_resumes_id_sequence_from_loaded_log() {
        use crate::session::record::Session;
        use chrono::{NaiveDate, TimeZone, Utc};

        let existing = Session {
            id: i64::MAX - 1000,
            topic: "Old".to_string(),
            minutes: 5,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
        };
        let log = SessionLog::from(vec![existing]);

        let mut store = MockSessionStore::new();
        let loaded = log.clone();
        store.expect_load().returning(move || Ok(Some(loaded.clone())));
        store.expect_save().returning(|_| Ok(()));

        let mut t = SessionTracker::new(store).unwrap();
        assert_eq!(t.stats().total_sessions, 1);

        t.start("New").unwrap();
        run_for(&mut t, 60);
        let finished = t.finish().unwrap();

        // New id is bumped past the loaded maximum
        assert!(finished.session.id > i64::MAX - 1000);
    }
}

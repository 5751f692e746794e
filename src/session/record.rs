//! Session records and the persisted session log.
//!
//! A [`Session`] is one completed, recorded study interval. The [`SessionLog`]
//! is the whole collection, newest-first, persisted as a unit on every
//! mutation.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::StudylogError;

/// Maximum length of a session topic, in characters.
pub const MAX_TOPIC_LEN: usize = 200;

/// Characters allowed in a topic; everything else is stripped.
static TOPIC_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w\s\-\.,!?():@#&+/']")
        .unwrap_or_else(|e| panic!("Invalid topic filter regex: {e}"))
});

/// One completed study session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique, monotonically increasing identifier (finish instant in
    /// milliseconds, bumped past collisions).
    pub id: i64,
    /// What was studied. Non-empty, trimmed, sanitized.
    pub topic: String,
    /// Whole minutes studied. Always at least 1.
    pub minutes: u32,
    /// Local calendar day the session was finished on.
    pub date: NaiveDate,
    /// Full instant the session was finished.
    pub timestamp: DateTime<Utc>,
}

/// Validate and sanitize a raw topic string.
///
/// Trims surrounding whitespace, strips characters outside the allowed set,
/// and caps the length at [`MAX_TOPIC_LEN`].
///
/// # Errors
///
/// Returns `StudylogError::Validation` if the topic is empty or
/// whitespace-only after cleanup.
pub fn validate_topic(raw: &str) -> Result<String, StudylogError> {
    let cleaned = TOPIC_CHARS.replace_all(raw, "");
    let mut topic = cleaned.trim().to_string();

    if topic.is_empty() {
        return Err(StudylogError::Validation(
            "topic cannot be empty".to_string(),
        ));
    }

    if topic.chars().count() > MAX_TOPIC_LEN {
        topic = topic.chars().take(MAX_TOPIC_LEN).collect::<String>();
        topic.truncate(topic.trim_end().len());
    }

    Ok(topic)
}

/// The full collection of recorded sessions, newest first.
///
/// Serialized as a bare JSON array; the log is always read and written as a
/// whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLog {
    sessions: Vec<Session>,
}

impl SessionLog {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sessions: Vec::new(),
        }
    }

    /// Number of recorded sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Iterate sessions newest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Session> {
        self.sessions.iter()
    }

    /// All sessions, newest first.
    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// The most recent `n` sessions (display truncation only).
    #[must_use]
    pub fn recent(&self, n: usize) -> &[Session] {
        &self.sessions[..self.sessions.len().min(n)]
    }

    /// The highest id in the log, if any.
    #[must_use]
    pub fn max_id(&self) -> Option<i64> {
        self.sessions.iter().map(|s| s.id).max()
    }

    /// Distinct calendar days with at least one session.
    #[must_use]
    pub fn distinct_dates(&self) -> HashSet<NaiveDate> {
        self.sessions.iter().map(|s| s.date).collect()
    }

    /// Record a newly finished session at the front of the log.
    pub fn push_front(&mut self, session: Session) {
        self.sessions.insert(0, session);
    }

    /// Merge imported sessions into the log.
    ///
    /// Incoming ids that collide with existing ones are bumped until unique,
    /// then the whole log is re-ordered newest first by id. Returns the
    /// number of sessions added.
    pub fn merge(&mut self, incoming: Vec<Session>) -> usize {
        let mut ids: HashSet<i64> = self.sessions.iter().map(|s| s.id).collect();
        let added = incoming.len();

        for mut session in incoming {
            while ids.contains(&session.id) {
                session.id += 1;
            }
            ids.insert(session.id);
            self.sessions.push(session);
        }

        self.sessions.sort_by(|a, b| b.id.cmp(&a.id));
        added
    }
}

impl<'a> IntoIterator for &'a SessionLog {
    type Item = &'a Session;
    type IntoIter = std::slice::Iter<'a, Session>;

    fn into_iter(self) -> Self::IntoIter {
        self.sessions.iter()
    }
}

impl From<Vec<Session>> for SessionLog {
    fn from(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }
}

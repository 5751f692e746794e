//! Error types for studylog.
//!
//! All errors are recoverable within a run: command handlers surface them to
//! the user and the process keeps (or cleanly ends) its session.

use thiserror::Error;

/// Errors that can occur in studylog.
#[derive(Debug, Error)]
pub enum StudylogError {
    /// Invalid user input (empty topic, starting over an active session).
    #[error("{0}")]
    Validation(String),

    /// The session ran for less than a minute and was not recorded.
    #[error("session too short to record ({elapsed_seconds}s) - a session needs at least one full minute")]
    TooShort {
        /// Elapsed seconds at the failed finish attempt.
        elapsed_seconds: u64,
    },

    /// Reading or writing the session log failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// An operation that needs an active session found none, or vice versa.
    #[error("{0}")]
    Session(String),

    /// Configuration file or environment problem.
    #[error("configuration error: {0}")]
    Config(String),

    /// CSV import failed outright (unreadable file, no usable rows).
    #[error("import error: {0}")]
    Import(String),

    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Parse(#[from] serde_json::Error),
}

//! Persistence for the session log.
//!
//! The core only knows the [`SessionStore`] capability: load the whole
//! collection (absent on first run) and save the whole collection. The
//! shipped implementation is a single JSON file; anything honoring the
//! whole-collection contract can stand in.

mod json;

pub use json::JsonStore;

use crate::error::StudylogError;
use crate::session::SessionLog;

/// Whole-collection persistence for the session log.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore {
    /// Load the persisted log.
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet (first run).
    ///
    /// # Errors
    ///
    /// Returns `StudylogError::Persistence` if stored data exists but cannot
    /// be read or parsed.
    fn load(&self) -> Result<Option<SessionLog>, StudylogError>;

    /// Persist the whole log, replacing any previous contents.
    ///
    /// # Errors
    ///
    /// Returns `StudylogError::Persistence` if the write fails. The caller's
    /// in-memory log remains the source of truth.
    fn save(&self, log: &SessionLog) -> Result<(), StudylogError>;
}

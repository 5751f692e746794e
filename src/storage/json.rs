//! JSON file implementation of the session store.
//!
//! The log lives in one file (`~/.studylog/sessions.json`) as a bare JSON
//! array, rewritten in full on every save.

use std::path::PathBuf;

use crate::config::Paths;
use crate::error::StudylogError;
use crate::session::SessionLog;

use super::SessionStore;

/// Session store backed by a single JSON file.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Open the store at the default location, creating the data directory
    /// if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be resolved or created.
    pub fn new() -> Result<Self, StudylogError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Ok(Self::at(paths.sessions_file))
    }

    /// Open the store at a specific file path (useful for testing).
    #[must_use]
    pub const fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for JsonStore {
    fn load(&self) -> Result<Option<SessionLog>, StudylogError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            StudylogError::Persistence(format!(
                "Failed to read session log {}: {e}",
                self.path.display()
            ))
        })?;

        let log = serde_json::from_str(&contents).map_err(|e| {
            StudylogError::Persistence(format!(
                "Session log {} is corrupt: {e}",
                self.path.display()
            ))
        })?;

        Ok(Some(log))
    }

    fn save(&self, log: &SessionLog) -> Result<(), StudylogError> {
        let contents = serde_json::to_string_pretty(log).map_err(|e| {
            StudylogError::Persistence(format!("Failed to serialize session log: {e}"))
        })?;

        std::fs::write(&self.path, contents).map_err(|e| {
            StudylogError::Persistence(format!(
                "Failed to write session log {}: {e}",
                self.path.display()
            ))
        })
    }
}

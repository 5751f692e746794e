//! Path resolution for studylog configuration and data files.
//!
//! All studylog data is stored in `~/.studylog/`:
//! - `config.yaml` - Main configuration file
//! - `sessions.json` - The persisted session log (whole collection)

use std::path::PathBuf;

use crate::error::StudylogError;

/// Paths to studylog configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.studylog/`
    pub root: PathBuf,
    /// Config file: `~/.studylog/config.yaml`
    pub config_file: PathBuf,
    /// Session log: `~/.studylog/sessions.json`
    pub sessions_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, StudylogError> {
        let home = std::env::var("HOME").map_err(|_| {
            StudylogError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".studylog")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            sessions_file: root.join("sessions.json"),
            root,
        }
    }

    /// Ensure the data directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StudylogError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                StudylogError::Config(format!(
                    "Failed to create directory {:?}: {}",
                    self.root, e
                ))
            })?;
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".studylog"))
        })
    }
}

//! Command implementations for studylog.
//!
//! Each function takes what it needs, reads or mutates the session log
//! through the store, and returns the formatted output string.

mod stats;
mod transfer;

pub use stats::{heatmap, stats};
pub use transfer::{export, import};

use clap::CommandFactory;

use crate::cli::args::{Cli, OutputFormat};
use crate::error::StudylogError;
use crate::output::format_sessions;
use crate::session::SessionLog;
use crate::storage::{JsonStore, SessionStore};

/// Load the persisted session log, empty on first run.
///
/// # Errors
///
/// Returns an error if persisted data exists but cannot be read.
pub fn load_log(store: &JsonStore) -> Result<SessionLog, StudylogError> {
    Ok(store.load()?.unwrap_or_default())
}

/// Execute the history command
///
/// # Errors
///
/// Returns an error if the session log cannot be read or output formatting
/// fails.
pub fn history(
    store: &JsonStore,
    limit: usize,
    format: OutputFormat,
) -> Result<String, StudylogError> {
    let log = load_log(store)?;
    format_sessions(log.recent(limit), "Recent Sessions", format)
}

/// Execute the clear command
///
/// # Errors
///
/// Returns an error without `force`, or if the empty log cannot be written.
pub fn clear(store: &JsonStore, force: bool) -> Result<String, StudylogError> {
    if !force {
        return Err(StudylogError::Validation(
            "This will delete all session history.\nUse --force to confirm.".to_string(),
        ));
    }

    store.save(&SessionLog::new())?;
    Ok("Session history cleared.".to_string())
}

/// Execute the completions command
#[must_use]
pub fn completions(shell: clap_complete::Shell) -> String {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "studylog", &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

//! CSV export and import command implementations.

use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::error::StudylogError;
use crate::output::to_json;
use crate::session::{from_csv, to_csv};
use crate::storage::{JsonStore, SessionStore};

use super::load_log;

/// Execute the export command.
///
/// Serializes the whole log as CSV; with `file` set the CSV is written there
/// and a confirmation is returned, otherwise the CSV itself is returned for
/// stdout.
///
/// # Errors
///
/// Returns an error if the session log cannot be read or the file cannot be
/// written.
pub fn export(store: &JsonStore, file: Option<&str>) -> Result<String, StudylogError> {
    let log = load_log(store)?;
    let csv = to_csv(&log);

    match file {
        Some(path) => {
            std::fs::write(path, &csv).map_err(|e| {
                StudylogError::Persistence(format!("Failed to write {path}: {e}"))
            })?;
            Ok(format!(
                "Exported {} session{} to {path}",
                log.len(),
                if log.len() == 1 { "" } else { "s" }
            ))
        }
        None => Ok(csv),
    }
}

/// Execute the import command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, contains no usable rows, or
/// the merged log cannot be persisted.
pub fn import(
    store: &JsonStore,
    file: &str,
    format: OutputFormat,
) -> Result<String, StudylogError> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| StudylogError::Import(format!("cannot read {file}: {e}")))?;

    let outcome = from_csv(&content)?;
    if outcome.sessions.is_empty() {
        return Err(StudylogError::Import(format!(
            "no valid rows in {file} ({} rejected)",
            outcome.errors.len()
        )));
    }

    let mut log = load_log(store)?;
    let added = log.merge(outcome.sessions);
    store.save(&log)?;

    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "imported": added,
            "rejected": outcome.errors,
        })),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            output.push(format!(
                "Imported {added} session{} from {file}",
                if added == 1 { "" } else { "s" }
            ));

            if !outcome.errors.is_empty() {
                output.push(format!("{} row(s) skipped:", outcome.errors.len()).yellow().to_string());
                for error in &outcome.errors {
                    output.push(format!("  {error}"));
                }
            }

            Ok(output.join("\n"))
        }
    }
}

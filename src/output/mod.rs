//! Output formatting for studylog.
//!
//! This module provides formatters for displaying sessions and statistics in
//! pretty (colored) or JSON form.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::StudylogError;
use crate::session::{Report, Session};

pub use json::*;
pub use pretty::*;

/// Format a list of sessions based on output format
///
/// # Errors
///
/// Returns `StudylogError::Parse` if JSON serialization fails.
pub fn format_sessions(
    sessions: &[Session],
    title: &str,
    format: OutputFormat,
) -> Result<String, StudylogError> {
    match format {
        OutputFormat::Pretty => Ok(format_sessions_pretty(sessions, title)),
        OutputFormat::Json => format_sessions_json(sessions, title),
    }
}

/// Format the statistics report based on output format
///
/// # Errors
///
/// Returns `StudylogError::Parse` if JSON serialization fails.
pub fn format_report(
    report: &Report,
    top_topics: usize,
    format: OutputFormat,
) -> Result<String, StudylogError> {
    match format {
        OutputFormat::Pretty => Ok(format_report_pretty(report, top_topics)),
        OutputFormat::Json => to_json(report),
    }
}

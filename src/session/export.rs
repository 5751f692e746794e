//! CSV export and import of the session log.
//!
//! Export is a pure transform to the fixed interchange shape the desktop
//! companion also speaks: a `Topic,Minutes,Date,Timestamp` header and one row
//! per session with the topic quoted. The rows are assembled by hand because
//! only the topic column is quoted; `csv`'s writer quoting styles are
//! all-or-nothing. Import goes through the `csv` reader and is tolerant:
//! a header row is skipped and bad rows are reported without aborting the
//! batch.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use super::record::{validate_topic, Session, SessionLog};
use crate::error::StudylogError;

/// The fixed export header.
pub const CSV_HEADER: &str = "Topic,Minutes,Date,Timestamp";

/// Serialize the whole log as CSV, newest first.
#[must_use]
pub fn to_csv(log: &SessionLog) -> String {
    let mut out = String::with_capacity(64 * (log.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');

    for session in log {
        out.push_str(&format!(
            "\"{}\",{},{},{}\n",
            session.topic.replace('"', "\"\""),
            session.minutes,
            session.date.format("%Y-%m-%d"),
            session.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
    }

    out
}

/// Result of parsing a CSV import.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    /// Sessions that parsed cleanly, in file order.
    pub sessions: Vec<Session>,
    /// One message per rejected row.
    pub errors: Vec<String>,
}

/// Parse CSV content into sessions.
///
/// Expects `Topic,Minutes,Date,Timestamp` rows; a header row (first field
/// containing "topic", case-insensitive) is skipped. Rows that fail
/// validation are collected in [`ImportOutcome::errors`] and the rest are
/// returned.
///
/// # Errors
///
/// Returns `StudylogError::Import` if the content cannot be read as CSV at
/// all or contains no rows.
pub fn from_csv(content: &str) -> Result<ImportOutcome, StudylogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut outcome = ImportOutcome::default();
    let mut saw_row = false;

    for (index, record) in reader.records().enumerate() {
        let row_number = index + 1;
        let record =
            record.map_err(|e| StudylogError::Import(format!("unreadable CSV: {e}")))?;
        saw_row = true;

        // Skip a header row wherever the file starts
        if index == 0
            && record
                .get(0)
                .is_some_and(|f| f.to_lowercase().contains("topic"))
        {
            continue;
        }

        match parse_row(&record) {
            Ok(session) => outcome.sessions.push(session),
            Err(reason) => outcome.errors.push(format!("row {row_number}: {reason}")),
        }
    }

    if !saw_row {
        return Err(StudylogError::Import("no rows found".to_string()));
    }

    Ok(outcome)
}

/// Parse one data row into a session.
fn parse_row(record: &csv::StringRecord) -> Result<Session, String> {
    if record.len() < 4 {
        return Err(format!("expected 4 columns, got {}", record.len()));
    }

    let topic = validate_topic(record.get(0).unwrap_or_default())
        .map_err(|e| e.to_string())?;

    let minutes: u32 = record
        .get(1)
        .unwrap_or_default()
        .trim()
        .parse()
        .map_err(|_| format!("invalid minutes '{}'", record.get(1).unwrap_or_default()))?;
    if minutes == 0 {
        return Err("minutes must be positive".to_string());
    }

    let date_field = record.get(2).unwrap_or_default().trim();
    let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{date_field}'"))?;

    let ts_field = record.get(3).unwrap_or_default().trim();
    let timestamp = DateTime::parse_from_rfc3339(ts_field)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| format!("invalid timestamp '{ts_field}'"))?;

    Ok(Session {
        id: timestamp.timestamp_millis(),
        topic,
        minutes,
        date,
        timestamp,
    })
}

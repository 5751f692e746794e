//! JSON output formatting for studylog.

use serde::Serialize;
use serde_json::json;

use crate::error::StudylogError;
use crate::session::Session;

/// Format sessions as JSON
///
/// # Errors
///
/// Returns `StudylogError::Parse` if JSON serialization fails.
pub fn format_sessions_json(sessions: &[Session], title: &str) -> Result<String, StudylogError> {
    let output = json!({
        "list": title,
        "count": sessions.len(),
        "items": sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `StudylogError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StudylogError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn make_session(id: i64, topic: &str, minutes: u32) -> Session {
        Session {
            id,
            topic: topic.to_string(),
            minutes,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_sessions_json_empty() {
        let result = format_sessions_json(&[], "History").unwrap();

        assert!(result.contains("\"list\": \"History\""));
        assert!(result.contains("\"count\": 0"));
        assert!(result.contains("\"items\": []"));
    }

    #[test]
    fn test_format_sessions_json_fields() {
        let sessions = vec![make_session(1, "Math", 25)];
        let result = format_sessions_json(&sessions, "History").unwrap();

        assert!(result.contains("\"count\": 1"));
        assert!(result.contains("\"topic\": \"Math\""));
        assert!(result.contains("\"minutes\": 25"));
        assert!(result.contains("\"date\": \"2024-01-01\""));
    }

    #[test]
    fn test_json_preserves_special_characters() {
        let sessions = vec![make_session(1, "Reading \"Dune\"", 5)];
        let result = format_sessions_json(&sessions, "History").unwrap();

        assert!(result.contains("\\\"Dune\\\""));
    }

    #[test]
    fn test_to_json_generic() {
        let session = make_session(7, "Physics", 40);
        let result = to_json(&session).unwrap();

        assert!(result.contains("\"topic\": \"Physics\""));
        assert!(result.contains("\"id\": 7"));
    }
}

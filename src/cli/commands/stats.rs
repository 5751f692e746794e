//! Statistics command implementations.

use chrono::Local;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::StudylogError;
use crate::output::{format_heatmap_pretty, format_report, to_json};
use crate::session::{daily_minutes, Report};
use crate::storage::JsonStore;

use super::load_log;

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if the session log cannot be read or output formatting
/// fails.
pub fn stats(
    store: &JsonStore,
    config: &Config,
    format: OutputFormat,
) -> Result<String, StudylogError> {
    let log = load_log(store)?;
    let report = Report::generate(&log, Local::now().date_naive());

    format_report(&report, config.stats.top_topics, format)
}

/// Execute the heatmap command.
///
/// # Errors
///
/// Returns an error if the session log cannot be read or output formatting
/// fails.
pub fn heatmap(
    store: &JsonStore,
    config: &Config,
    weeks: Option<usize>,
    format: OutputFormat,
) -> Result<String, StudylogError> {
    let log = load_log(store)?;
    let by_day = daily_minutes(&log);
    let weeks = weeks.unwrap_or(config.stats.heatmap_weeks);

    match format {
        OutputFormat::Pretty => Ok(format_heatmap_pretty(
            &by_day,
            weeks,
            Local::now().date_naive(),
        )),
        OutputFormat::Json => {
            let mut days: Vec<_> = by_day
                .iter()
                .map(|(date, minutes)| {
                    serde_json::json!({
                        "date": date,
                        "minutes": minutes,
                        "level": crate::session::activity_level(*minutes),
                    })
                })
                .collect();
            days.sort_by_key(|v| v["date"].as_str().map(String::from));
            to_json(&days)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionLog};
    use crate::storage::SessionStore;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;

    fn seeded_store(temp_dir: &TempDir) -> JsonStore {
        let store = JsonStore::at(temp_dir.path().join("sessions.json"));
        let log = SessionLog::from(vec![Session {
            id: 1,
            topic: "Math".to_string(),
            minutes: 45,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
        }]);
        store.save(&log).unwrap();
        store
    }

    #[test]
    fn test_stats_pretty_shows_totals() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(&temp_dir);

        let output = stats(&store, &Config::default(), OutputFormat::Pretty).unwrap();
        assert!(output.contains("Total sessions:      1"));
        assert!(output.contains("Math"));
    }

    #[test]
    fn test_stats_json_has_fields() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(&temp_dir);

        let output = stats(&store, &Config::default(), OutputFormat::Json).unwrap();
        assert!(output.contains("\"total_sessions\": 1"));
        assert!(output.contains("\"total_minutes\": 45"));
        assert!(output.contains("\"streak\""));
    }

    #[test]
    fn test_heatmap_json_levels() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(&temp_dir);

        let output = heatmap(&store, &Config::default(), Some(4), OutputFormat::Json).unwrap();
        assert!(output.contains("\"2024-01-01\""));
        assert!(output.contains("\"level\": 1"));
    }
}

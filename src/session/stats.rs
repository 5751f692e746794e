//! Derived statistics over the session log.
//!
//! Everything here is recomputed from the full log on demand; nothing is
//! cached or persisted. [`Stats`] is the small always-visible summary;
//! [`Report`] is the extended aggregate behind `studylog stats`.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::record::SessionLog;

/// How far back the streak walk is allowed to go.
const STREAK_WINDOW_DAYS: i64 = 366;

/// Minutes-per-day thresholds for heatmap activity levels 1 through 4.
pub const LEVEL_THRESHOLDS: [u64; 4] = [30, 60, 120, 240];

/// The summary statistics shown alongside the timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of recorded sessions.
    pub total_sessions: usize,
    /// Sum of minutes over all sessions.
    pub total_minutes: u64,
    /// Consecutive study days ending at (or just before) today.
    pub streak: u32,
}

impl Stats {
    /// Recompute the summary from the full log.
    ///
    /// Pure: the same log and `today` always produce the same result.
    #[must_use]
    pub fn compute(log: &SessionLog, today: NaiveDate) -> Self {
        Self {
            total_sessions: log.len(),
            total_minutes: log.iter().map(|s| u64::from(s.minutes)).sum(),
            streak: current_streak(&log.distinct_dates(), today),
        }
    }
}

/// Walk backward from `today` counting consecutive days with activity.
///
/// Day zero (today) is exempt from breaking the walk: a streak that is
/// current should not read as broken just because today's session has not
/// been finished yet. Absence on any earlier day ends the walk. Bounded to
/// guarantee termination.
fn current_streak(dates: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;

    for i in 0..STREAK_WINDOW_DAYS {
        let day = today - Duration::days(i);

        if dates.contains(&day) {
            streak += 1;
        } else if i == 0 {
            // No session yet today; check yesterday
            continue;
        } else {
            break;
        }
    }

    streak
}

/// Longest run of consecutive study days anywhere in the log.
#[must_use]
pub fn longest_streak(dates: &HashSet<NaiveDate>) -> u32 {
    let mut sorted: Vec<NaiveDate> = dates.iter().copied().collect();
    sorted.sort_unstable();

    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for date in sorted {
        run = match prev {
            Some(p) if date - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }

    longest
}

/// Total minutes studied per calendar day.
#[must_use]
pub fn daily_minutes(log: &SessionLog) -> HashMap<NaiveDate, u64> {
    let mut by_day: HashMap<NaiveDate, u64> = HashMap::new();
    for session in log {
        *by_day.entry(session.date).or_insert(0) += u64::from(session.minutes);
    }
    by_day
}

/// Heatmap activity level (0-4) for a day's minute total.
///
/// Any nonzero activity is at least level 1.
#[must_use]
pub fn activity_level(minutes: u64) -> u8 {
    match minutes {
        0 => 0,
        m if m >= LEVEL_THRESHOLDS[3] => 4,
        m if m >= LEVEL_THRESHOLDS[2] => 3,
        m if m >= LEVEL_THRESHOLDS[1] => 2,
        _ => 1,
    }
}

/// Minutes and session count for one topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicTotal {
    /// The topic text.
    pub topic: String,
    /// Number of sessions under this topic.
    pub sessions: usize,
    /// Total minutes under this topic.
    pub minutes: u64,
}

/// Minutes and session count for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTotal {
    /// The day.
    pub date: NaiveDate,
    /// Total minutes that day.
    pub minutes: u64,
    /// Number of sessions that day.
    pub sessions: usize,
}

/// Extended statistics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// The summary triple.
    #[serde(flatten)]
    pub stats: Stats,
    /// Days with at least one session.
    pub active_days: usize,
    /// Longest consecutive-day run in the whole log.
    pub longest_streak: u32,
    /// Average minutes per active day.
    pub avg_minutes_per_active_day: f64,
    /// Busiest single day, in minutes.
    pub max_minutes_in_day: u64,
    /// Per-topic totals, most minutes first.
    pub by_topic: Vec<TopicTotal>,
    /// Per-day totals, newest first.
    pub daily: Vec<DailyTotal>,
}

impl Report {
    /// Generate the extended report from the full log.
    #[must_use]
    pub fn generate(log: &SessionLog, today: NaiveDate) -> Self {
        let stats = Stats::compute(log, today);
        let dates = log.distinct_dates();
        let by_day = daily_minutes(log);

        let active_days = by_day.len();
        let max_minutes_in_day = by_day.values().copied().max().unwrap_or(0);
        #[allow(clippy::cast_precision_loss)]
        let avg_minutes_per_active_day = if active_days > 0 {
            stats.total_minutes as f64 / active_days as f64
        } else {
            0.0
        };

        let mut topic_map: HashMap<&str, (usize, u64)> = HashMap::new();
        for session in log {
            let entry = topic_map.entry(session.topic.as_str()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += u64::from(session.minutes);
        }

        let mut by_topic: Vec<TopicTotal> = topic_map
            .into_iter()
            .map(|(topic, (sessions, minutes))| TopicTotal {
                topic: topic.to_string(),
                sessions,
                minutes,
            })
            .collect();
        by_topic.sort_by(|a, b| b.minutes.cmp(&a.minutes).then(a.topic.cmp(&b.topic)));

        let mut session_count_by_day: HashMap<NaiveDate, usize> = HashMap::new();
        for session in log {
            *session_count_by_day.entry(session.date).or_insert(0) += 1;
        }

        let mut daily: Vec<DailyTotal> = by_day
            .iter()
            .map(|(&date, &minutes)| DailyTotal {
                date,
                minutes,
                sessions: session_count_by_day.get(&date).copied().unwrap_or(0),
            })
            .collect();
        daily.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            stats,
            active_days,
            longest_streak: longest_streak(&dates),
            avg_minutes_per_active_day,
            max_minutes_in_day,
            by_topic,
            daily,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::record::Session;
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log_on_days(entries: &[((i32, u32, u32), u32)]) -> SessionLog {
        let sessions: Vec<Session> = entries
            .iter()
            .enumerate()
            .map(|(i, &((y, m, d), minutes))| Session {
                id: i as i64 + 1,
                topic: format!("topic {i}"),
                minutes,
                date: day(y, m, d),
                timestamp: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            })
            .collect();
        SessionLog::from(sessions)
    }

    #[test]
    fn test_totals() {
        let log = log_on_days(&[((2024, 1, 1), 5), ((2024, 1, 1), 10), ((2024, 1, 2), 20)]);
        let stats = Stats::compute(&log, day(2024, 1, 2));

        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.total_minutes, 35);
    }

    #[test]
    fn test_stats_idempotent() {
        let log = log_on_days(&[((2024, 1, 1), 5), ((2024, 1, 2), 10)]);
        let today = day(2024, 1, 2);

        assert_eq!(Stats::compute(&log, today), Stats::compute(&log, today));
    }

    #[test]
    fn test_streak_three_consecutive_days_including_today() {
        let log = log_on_days(&[((2024, 1, 1), 5), ((2024, 1, 2), 5), ((2024, 1, 3), 5)]);
        let stats = Stats::compute(&log, day(2024, 1, 3));

        assert_eq!(stats.streak, 3);
    }

    #[test]
    fn test_streak_broken_by_gap_before_today() {
        // Sessions on Jan 1 and 2 only; today is Jan 4. Day 0 is skipped,
        // Jan 3 is absent, so the walk ends at zero.
        let log = log_on_days(&[((2024, 1, 1), 5), ((2024, 1, 2), 5)]);
        let stats = Stats::compute(&log, day(2024, 1, 4));

        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn test_streak_today_not_yet_logged_does_not_break() {
        // Sessions on Jan 2 and 3; today is Jan 4 with nothing logged yet.
        let log = log_on_days(&[((2024, 1, 2), 5), ((2024, 1, 3), 5)]);
        let stats = Stats::compute(&log, day(2024, 1, 4));

        assert_eq!(stats.streak, 2);
    }

    #[test]
    fn test_streak_empty_log() {
        let stats = Stats::compute(&SessionLog::new(), day(2024, 1, 1));
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn test_streak_terminates_on_dense_history() {
        // Two years of daily sessions: the walk must stop at its bound.
        use chrono::Datelike;

        let mut entries = Vec::new();
        let mut date = day(2022, 1, 1);
        let end = day(2024, 1, 1);
        while date <= end {
            entries.push(((date.year(), date.month(), date.day()), 5));
            date += Duration::days(1);
        }
        let log = log_on_days(&entries);
        let stats = Stats::compute(&log, end);

        assert_eq!(i64::from(stats.streak), STREAK_WINDOW_DAYS);
    }

    #[test]
    fn test_longest_streak_finds_interior_run() {
        // Runs: Jan 1-2 (2 days) and Jan 10-12 (3 days)
        let log = log_on_days(&[
            ((2024, 1, 1), 5),
            ((2024, 1, 2), 5),
            ((2024, 1, 10), 5),
            ((2024, 1, 11), 5),
            ((2024, 1, 12), 5),
        ]);

        assert_eq!(longest_streak(&log.distinct_dates()), 3);
    }

    #[test]
    fn test_longest_streak_empty() {
        assert_eq!(longest_streak(&HashSet::new()), 0);
    }

    #[test]
    fn test_daily_minutes_aggregates() {
        let log = log_on_days(&[((2024, 1, 1), 5), ((2024, 1, 1), 10), ((2024, 1, 2), 1)]);
        let by_day = daily_minutes(&log);

        assert_eq!(by_day[&day(2024, 1, 1)], 15);
        assert_eq!(by_day[&day(2024, 1, 2)], 1);
    }

    #[test]
    fn test_activity_levels() {
        assert_eq!(activity_level(0), 0);
        assert_eq!(activity_level(1), 1);
        assert_eq!(activity_level(29), 1);
        assert_eq!(activity_level(30), 1);
        assert_eq!(activity_level(60), 2);
        assert_eq!(activity_level(120), 3);
        assert_eq!(activity_level(240), 4);
        assert_eq!(activity_level(1000), 4);
    }

    #[test]
    fn test_report_aggregates() {
        let log = log_on_days(&[((2024, 1, 1), 30), ((2024, 1, 2), 60), ((2024, 1, 2), 30)]);
        let report = Report::generate(&log, day(2024, 1, 2));

        assert_eq!(report.stats.total_sessions, 3);
        assert_eq!(report.stats.total_minutes, 120);
        assert_eq!(report.active_days, 2);
        assert_eq!(report.longest_streak, 2);
        assert_eq!(report.max_minutes_in_day, 90);
        assert!((report.avg_minutes_per_active_day - 60.0).abs() < f64::EPSILON);
        assert_eq!(report.daily[0].date, day(2024, 1, 2));
        assert_eq!(report.daily[0].sessions, 2);
    }

    #[test]
    fn test_report_topics_sorted_by_minutes() {
        let mut log = SessionLog::new();
        for (id, topic, minutes) in [(1, "Math", 10), (2, "History", 50), (3, "Math", 20)] {
            log.push_front(Session {
                id,
                topic: topic.to_string(),
                minutes,
                date: day(2024, 1, 1),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            });
        }

        let report = Report::generate(&log, day(2024, 1, 1));
        assert_eq!(report.by_topic[0].topic, "History");
        assert_eq!(report.by_topic[1].topic, "Math");
        assert_eq!(report.by_topic[1].sessions, 2);
        assert_eq!(report.by_topic[1].minutes, 30);
    }

    #[test]
    fn test_report_empty_log() {
        let report = Report::generate(&SessionLog::new(), day(2024, 1, 1));

        assert_eq!(report.stats.total_sessions, 0);
        assert_eq!(report.active_days, 0);
        assert!(report.by_topic.is_empty());
        assert!((report.avg_minutes_per_active_day).abs() < f64::EPSILON);
    }
}

//! Pretty (colored, human-readable) output formatting for studylog.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use colored::Colorize;

use crate::session::{activity_level, Report, Session};

/// GitHub-style heatmap colors, by activity level.
const LEVEL_COLORS: [(u8, u8, u8); 5] = [
    (235, 237, 240), // no activity
    (155, 233, 168), // light
    (64, 196, 99),   // moderate
    (48, 161, 78),   // high
    (33, 110, 57),   // very high
];

/// Format minutes as a short duration (e.g., "25m", "1h 30m").
#[must_use]
pub fn format_minutes(total_minutes: u64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Format a list of sessions as a table, newest first.
#[must_use]
pub fn format_sessions_pretty(sessions: &[Session], title: &str) -> String {
    if sessions.is_empty() {
        return format!("{title}\n\nNo sessions recorded yet.\nStart one with: studylog timer");
    }

    let mut output = Vec::new();
    output.push(title.bold().to_string());
    output.push("═".repeat(60));
    output.push(format!(
        "{:<12} {:<7} {:>8}   {}",
        "Date", "Time", "Duration", "Topic"
    ));
    output.push("─".repeat(60));

    for session in sessions {
        let topic = if session.topic.chars().count() > 32 {
            let short: String = session.topic.chars().take(29).collect();
            format!("{short}...")
        } else {
            session.topic.clone()
        };

        output.push(format!(
            "{:<12} {:<7} {:>8}   {}",
            session.date.format("%Y-%m-%d"),
            session.timestamp.with_timezone(&chrono::Local).format("%H:%M"),
            format_minutes(u64::from(session.minutes)),
            topic
        ));
    }

    output.join("\n")
}

/// Format the statistics report.
#[must_use]
pub fn format_report_pretty(report: &Report, top_topics: usize) -> String {
    let mut lines = Vec::new();

    lines.push("📊 Study Statistics".bold().to_string());
    lines.push("═".repeat(50));
    lines.push(String::new());

    lines.push("Summary".to_string());
    lines.push("─".repeat(40));
    lines.push(format!(
        "  Total sessions:      {}",
        report.stats.total_sessions
    ));
    lines.push(format!(
        "  Total study time:    {}",
        format_minutes(report.stats.total_minutes)
    ));
    lines.push(format!(
        "  Current streak:      🔥 {} day{}",
        report.stats.streak,
        if report.stats.streak == 1 { "" } else { "s" }
    ));
    lines.push(format!("  Longest streak:      {} days", report.longest_streak));
    lines.push(format!("  Active days:         {}", report.active_days));
    lines.push(format!(
        "  Avg per active day:  {:.0} minutes",
        report.avg_minutes_per_active_day
    ));
    lines.push(format!(
        "  Busiest day:         {}",
        format_minutes(report.max_minutes_in_day)
    ));

    if !report.by_topic.is_empty() {
        lines.push(String::new());
        lines.push("Top Topics".to_string());
        lines.push("─".repeat(40));

        let max_minutes = report
            .by_topic
            .iter()
            .map(|t| t.minutes)
            .max()
            .unwrap_or(1)
            .max(1);

        for topic in report.by_topic.iter().take(top_topics) {
            let name = if topic.topic.chars().count() > 22 {
                let short: String = topic.topic.chars().take(19).collect();
                format!("{short}...")
            } else {
                topic.topic.clone()
            };

            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_precision_loss,
                clippy::cast_sign_loss
            )]
            let bar_len = (topic.minutes as f64 / max_minutes as f64 * 20.0) as usize;
            lines.push(format!(
                "  {:<22} {:>7} {}",
                name,
                format_minutes(topic.minutes),
                "█".repeat(bar_len).green()
            ));
        }
    }

    if !report.daily.is_empty() {
        lines.push(String::new());
        lines.push("Recent Days".to_string());
        lines.push("─".repeat(40));

        for day in report.daily.iter().take(7) {
            lines.push(format!(
                "  {} {:>7} ({} session{})",
                day.date.format("%Y-%m-%d"),
                format_minutes(day.minutes),
                day.sessions,
                if day.sessions == 1 { "" } else { "s" }
            ));
        }
    }

    lines.join("\n")
}

/// Render a contribution-style heatmap for the last `weeks` weeks.
///
/// Rows are weekdays Monday through Sunday; columns are weeks ending at
/// `today`'s week.
#[must_use]
pub fn format_heatmap_pretty(
    by_day: &HashMap<NaiveDate, u64>,
    weeks: usize,
    today: NaiveDate,
) -> String {
    let weeks = weeks.max(1);
    let this_monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    let first_monday = this_monday - Duration::weeks(i64::try_from(weeks).unwrap_or(1) - 1);

    let mut lines = Vec::new();
    lines.push("📅 Study Activity".bold().to_string());
    lines.push(String::new());

    let labels = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    for (row, label) in labels.iter().enumerate() {
        let mut line = format!("  {label} ");

        for week in 0..weeks {
            let day = first_monday
                + Duration::weeks(i64::try_from(week).unwrap_or(0))
                + Duration::days(i64::try_from(row).unwrap_or(0));

            if day > today {
                line.push_str("  ");
                continue;
            }

            let minutes = by_day.get(&day).copied().unwrap_or(0);
            line.push_str(&cell(activity_level(minutes)));
        }

        lines.push(line);
    }

    lines.push(String::new());
    let mut legend = String::from("      Less ");
    for level in 0..=4 {
        legend.push_str(&cell(level));
    }
    legend.push_str(" More");
    lines.push(legend);

    lines.join("\n")
}

/// One colored heatmap cell for an activity level.
fn cell(level: u8) -> String {
    let (r, g, b) = LEVEL_COLORS[usize::from(level.min(4))];
    "■ ".truecolor(r, g, b).to_string()
}

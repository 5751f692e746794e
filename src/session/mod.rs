//! Study session domain: records, timer, tracker, statistics, CSV.

mod export;
mod record;
mod stats;
mod timer;
mod tracker;

pub use export::{from_csv, to_csv, ImportOutcome, CSV_HEADER};
pub use record::{validate_topic, Session, SessionLog, MAX_TOPIC_LEN};
pub use stats::{
    activity_level, daily_minutes, longest_streak, DailyTotal, Report, Stats, TopicTotal,
    LEVEL_THRESHOLDS,
};
pub use timer::{format_elapsed, Timer, TimerState};
pub use tracker::{Finished, SessionTracker};

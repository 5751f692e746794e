//! Configuration management for studylog.
//!
//! This module handles loading and saving configuration from `~/.studylog/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, StatsConfig, TimerConfig};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "studylog")]
#[command(about = "A study session timer and tracker for the terminal")]
#[command(long_about = "studylog - a study session timer and tracker

Run timed study sessions from your terminal, keep a local log of everything
you finish, and watch your totals and day streak grow.

QUICK START:
  studylog timer            Open the interactive timer
  studylog history          Show recent sessions
  studylog stats            Show totals, streaks, and top topics
  studylog export           Dump the session log as CSV

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  studylog <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive session timer
    ///
    /// Full-screen timer for running a study session. Type a topic, start
    /// the clock, pause when you step away, and finish to record the
    /// session. Finished sessions are written to the local log and show up
    /// in 'history' and 'stats' immediately.
    ///
    /// A session must run for at least one full minute to be recorded;
    /// finishing earlier keeps the clock running so you can decide to
    /// continue.
    ///
    /// # Keybindings
    ///
    ///   type           Edit the topic (while idle)
    ///   Enter          Start the session
    ///   Space          Pause / resume
    ///   f              Finish and record the session
    ///   q/Esc          Quit (an unfinished session is discarded)
    ///
    /// # Examples
    ///
    ///   studylog timer            Open the timer
    ///   studylog timer "Math"     Open with the topic prefilled
    #[command(alias = "t")]
    Timer(TimerArgs),

    /// Show recent sessions
    ///
    /// Lists recorded sessions, newest first. The log itself is never
    /// truncated - this only limits the display.
    ///
    /// # Examples
    ///
    ///   studylog history              Show the last 10 sessions
    ///   studylog history -n 25        Show the last 25
    ///   studylog history -o json      Output as JSON for scripting
    #[command(alias = "h")]
    History {
        /// Number of sessions to show
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,
    },

    /// Show study statistics
    ///
    /// Totals, current and longest day streak, active days, and your top
    /// topics, all recomputed from the session log.
    ///
    /// The current streak counts consecutive study days walking back from
    /// today; a day without a session breaks it, but today itself gets a
    /// grace period until you log your first session of the day.
    ///
    /// # Examples
    ///
    ///   studylog stats                Show the summary
    ///   studylog stats -o json        Output as JSON
    Stats,

    /// Show a study activity heatmap
    ///
    /// Contribution-style calendar of study minutes per day. Cell intensity
    /// steps at 30, 60, 120, and 240 minutes.
    ///
    /// # Examples
    ///
    ///   studylog heatmap              Last 8 weeks
    ///   studylog heatmap -w 16        Last 16 weeks
    Heatmap {
        /// Number of weeks to show
        #[arg(long, short = 'w')]
        weeks: Option<usize>,
    },

    /// Export the session log as CSV
    ///
    /// Writes the whole log in the interchange format
    /// 'Topic,Minutes,Date,Timestamp', one row per session, newest first.
    /// Without --file the CSV goes to stdout for piping.
    ///
    /// # Examples
    ///
    ///   studylog export                       Print CSV to stdout
    ///   studylog export --file sessions.csv   Write to a file
    ///   studylog export | wc -l               Count sessions
    #[command(alias = "e")]
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short = 'f')]
        file: Option<String>,
    },

    /// Import sessions from a CSV file
    ///
    /// Reads 'Topic,Minutes,Date,Timestamp' rows (a header row is skipped)
    /// and merges them into the session log. Rows that fail validation are
    /// reported and skipped; the rest are imported.
    ///
    /// # Examples
    ///
    ///   studylog import sessions.csv
    Import {
        /// CSV file to import
        file: String,
    },

    /// Delete all session history
    ///
    /// Clears the persisted session log (use with caution).
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Generate shell completions
    ///
    /// Outputs a completion script for the specified shell.
    /// Redirect to a file or source directly.
    ///
    /// # Examples
    ///
    ///   studylog completions bash > ~/.bash_completion.d/studylog
    ///   studylog completions zsh > ~/.zfunc/_studylog
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments for the interactive timer.
#[derive(Args)]
pub struct TimerArgs {
    /// Prefill the topic field
    pub topic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_asserts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_history_limit() {
        let cli = Cli::parse_from(["studylog", "history", "-n", "25"]);
        match cli.command {
            Commands::History { limit } => assert_eq!(limit, 25),
            _ => panic!("expected history command"),
        }
    }

    #[test]
    fn test_output_format_default_is_pretty() {
        let cli = Cli::parse_from(["studylog", "stats"]);
        assert_eq!(cli.output, OutputFormat::Pretty);
    }

    #[test]
    fn test_timer_alias() {
        let cli = Cli::parse_from(["studylog", "t", "Math"]);
        match cli.command {
            Commands::Timer(args) => assert_eq!(args.topic.as_deref(), Some("Math")),
            _ => panic!("expected timer command"),
        }
    }
}

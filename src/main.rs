use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use studylog::cli::args::{Cli, Commands};
use studylog::cli::commands;
use studylog::config::Config;
use studylog::error::StudylogError;
use studylog::storage::JsonStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let format = cli.output;

    let output = match cli.command {
        Commands::Timer(args) => {
            studylog::tui::run(&config, args.topic)?;
            String::new()
        }
        Commands::History { limit } => commands::history(&store()?, limit, format)?,
        Commands::Stats => commands::stats(&store()?, &config, format)?,
        Commands::Heatmap { weeks } => commands::heatmap(&store()?, &config, weeks, format)?,
        Commands::Export { file } => commands::export(&store()?, file.as_deref())?,
        Commands::Import { file } => commands::import(&store()?, &file, format)?,
        Commands::Clear { force } => commands::clear(&store()?, force)?,
        Commands::Completions { shell } => commands::completions(shell),
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn store() -> Result<JsonStore, StudylogError> {
    JsonStore::new()
}

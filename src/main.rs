//! Terminal 2048 runner (default binary).
//!
//! Parses the command line, sets up logging, plays one game (live, replayed, or
//! headless when recording a replay) and prints the final summary.

use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tui_2048::app;
use tui_2048::cli::Cli;
use tui_2048::store::Store;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_records {
        return show_records(&cli);
    }

    init_tracing(&cli)?;

    let report = app::run(&cli)?;
    println!("{}", report.outcome_line());
    println!("{}", report.high_score_line());
    println!("{}", report.time_line());
    println!("{}", report.seed_line());
    Ok(())
}

fn show_records(cli: &Cli) -> Result<()> {
    match Store::new(&cli.data_dir).read_game_records()? {
        Some(records) => {
            println!("All Game Records:");
            print!("{records}");
        }
        None => println!("No game records yet."),
    }
    Ok(())
}

/// Batch runs log to stderr. With the terminal UI up, logs only go to `--log-file`.
fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if cli.is_batch() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    } else if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

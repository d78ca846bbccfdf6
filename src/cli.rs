//! Command-line options.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::types::{GameMode, DEFAULT_REPLAY_DELAY_MS};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "tui-2048",
    version,
    about = "Terminal 2048 with bomb and chance tiles, undo, and deterministic replay"
)]
pub struct Cli {
    /// Game mode: 1 normal, 2 bomb, 3 chance, 4 time attack, 5 score race, 6 turn limit
    #[arg(
        short = 'm',
        long,
        value_name = "MODE",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(1..=6)
    )]
    pub mode: u8,

    /// Record every state-changing key with the resulting score
    #[arg(short = 'r', long, value_name = "FILE")]
    pub record: Option<PathBuf>,

    /// Replay keys from a file instead of the keyboard
    #[arg(short = 'p', long, value_name = "FILE")]
    pub playback: Option<PathBuf>,

    /// RNG seed (defaults to the current UNIX time)
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u32>,

    /// Delay between replayed keys, in milliseconds
    #[arg(short = 'd', long, value_name = "MS", default_value_t = DEFAULT_REPLAY_DELAY_MS)]
    pub delay: u64,

    /// Resume a saved game
    #[arg(short = 'l', long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// Print all finished-game records and exit
    #[arg(short = 'f', long)]
    pub show_records: bool,

    /// Directory holding high scores, achievements and game records
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Write logs here while the terminal UI is active
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn game_mode(&self) -> GameMode {
        GameMode::from_number(self.mode).unwrap_or_default()
    }

    /// Recording a replay runs headless at full speed.
    pub fn is_batch(&self) -> bool {
        self.record.is_some() && self.playback.is_some()
    }

    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as u32)
                .unwrap_or(1)
        })
    }

    pub fn replay_delay(&self) -> Duration {
        if self.is_batch() {
            Duration::ZERO
        } else {
            Duration::from_millis(self.delay)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tui-2048").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.game_mode(), GameMode::Normal);
        assert_eq!(cli.delay, DEFAULT_REPLAY_DELAY_MS);
        assert_eq!(cli.data_dir, PathBuf::from("."));
        assert!(!cli.is_batch());
        assert!(!cli.show_records);
    }

    #[test]
    fn short_flags() {
        let cli = parse(&["-m", "3", "-s", "42", "-d", "0", "-l", "save.txt", "-f"]);
        assert_eq!(cli.game_mode(), GameMode::Chance);
        assert_eq!(cli.seed(), 42);
        assert_eq!(cli.replay_delay(), Duration::ZERO);
        assert_eq!(cli.load, Some(PathBuf::from("save.txt")));
        assert!(cli.show_records);
    }

    #[test]
    fn record_and_playback_is_batch() {
        let cli = parse(&["-r", "out.txt", "-p", "in.txt", "-d", "500"]);
        assert!(cli.is_batch());
        assert_eq!(cli.replay_delay(), Duration::ZERO);

        let cli = parse(&["-p", "in.txt", "-d", "500"]);
        assert!(!cli.is_batch());
        assert_eq!(cli.replay_delay(), Duration::from_millis(500));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["tui-2048", "-m", "7"]).is_err());
        assert!(Cli::try_parse_from(["tui-2048", "-m", "0"]).is_err());
    }
}

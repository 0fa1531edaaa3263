use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::state::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

#[derive(Debug, Parser)]
#[command(name = "snake")]
#[command(version, about = "Snake in the terminal, with wraparound edges")]
pub struct Settings {
    /// Cells per side of the square board
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE,
          value_parser = clap::value_parser!(u16).range(MIN_BOARD_SIZE as i64..=MAX_BOARD_SIZE as i64))]
    pub board_size: u16,

    /// Milliseconds between two moves of the snake
    #[arg(long, default_value_t = 150, value_parser = clap::value_parser!(u64).range(20..=2000))]
    pub tick_ms: u64,

    /// Seed for food placement, for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output goes; the terminal itself is busy with the game
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::try_parse_from(["snake"]).unwrap();

        assert_eq!(settings.board_size, 20);
        assert_eq!(settings.tick_interval(), Duration::from_millis(150));
        assert_eq!(settings.seed, None);
        assert_eq!(settings.log_file, PathBuf::from("snake.log"));
        assert_eq!(settings.log_level, LogLevel::Info);
    }

    #[test]
    fn test_custom_values() {
        let settings = Settings::try_parse_from([
            "snake", "--board-size", "12", "--tick-ms", "80", "--seed", "9", "--log-level", "debug",
        ])
        .unwrap();

        assert_eq!(settings.board_size, 12);
        assert_eq!(settings.tick_ms, 80);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(LevelFilter::from(settings.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        assert!(Settings::try_parse_from(["snake", "--board-size", "3"]).is_err());
        assert!(Settings::try_parse_from(["snake", "--board-size", "61"]).is_err());
        assert!(Settings::try_parse_from(["snake", "--tick-ms", "5"]).is_err());
        assert!(Settings::try_parse_from(["snake", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Settings::command().debug_assert();
    }
}

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use go_board::MAX_BOARD_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub board_size: u8,
    pub move_delay: Duration,
    pub seed: Option<u64>,
    pub max_moves: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { name: &'static str, value: String },
    BoardSize(u64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { name, value } => write!(f, "invalid {name}: {value:?}"),
            ConfigError::BoardSize(size) => {
                write!(f, "BOARD_SIZE must be between 1 and {MAX_BOARD_SIZE}, got {size}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Read `BOARD_SIZE`, `MOVE_DELAY_MS`, `SEED` and `MAX_MOVES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let parse = |name: &'static str| -> Result<Option<u64>, ConfigError> {
            lookup(name)
                .map(|value| {
                    u64::from_str(value.trim()).map_err(|_| ConfigError::Invalid { name, value })
                })
                .transpose()
        };

        let raw_size = parse("BOARD_SIZE")?.unwrap_or(9);
        let board_size = match u8::try_from(raw_size) {
            Ok(size) if (1..=MAX_BOARD_SIZE).contains(&size) => size,
            _ => return Err(ConfigError::BoardSize(raw_size)),
        };

        Ok(Config {
            board_size,
            move_delay: Duration::from_millis(parse("MOVE_DELAY_MS")?.unwrap_or(100)),
            seed: parse("SEED")?,
            max_moves: parse("MAX_MOVES")?.map(|n| n as usize),
        })
    }
}

//! Timing and length of a match, read from the environment.

use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_ROUND_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_NEXT_ROUND_DELAY_MS: u64 = 5_000;
const DEFAULT_START_DELAY_MS: u64 = 500;
const DEFAULT_MAX_ROUNDS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// How long a round accepts moves before it resolves on timeout.
    pub round_timeout: Duration,
    /// Pause between a round result and the next round.
    pub next_round_delay: Duration,
    /// Pause between `GAME_START` and the first round.
    pub start_delay: Duration,
    pub max_rounds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_timeout: Duration::from_millis(DEFAULT_ROUND_TIMEOUT_MS),
            next_round_delay: Duration::from_millis(DEFAULT_NEXT_ROUND_DELAY_MS),
            start_delay: Duration::from_millis(DEFAULT_START_DELAY_MS),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl GameConfig {
    /// Read `RPS_ROUND_TIMEOUT_MS`, `RPS_NEXT_ROUND_DELAY_MS`, `RPS_START_DELAY_MS`
    /// and `RPS_MAX_ROUNDS`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let millis = |key: &str, default: u64| -> Result<Duration, AppError> {
            match lookup(key) {
                None => Ok(Duration::from_millis(default)),
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| AppError::config(format!("{key} must be milliseconds: {e}"))),
            }
        };

        let round_timeout = millis("RPS_ROUND_TIMEOUT_MS", DEFAULT_ROUND_TIMEOUT_MS)?;
        if round_timeout.is_zero() {
            return Err(AppError::config("RPS_ROUND_TIMEOUT_MS must be positive"));
        }

        let max_rounds = match lookup("RPS_MAX_ROUNDS") {
            None => DEFAULT_MAX_ROUNDS,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| AppError::config(format!("RPS_MAX_ROUNDS must be a number: {e}")))?,
        };
        if max_rounds == 0 {
            return Err(AppError::config("RPS_MAX_ROUNDS must be at least 1"));
        }

        Ok(Self {
            round_timeout,
            next_round_delay: millis("RPS_NEXT_ROUND_DELAY_MS", DEFAULT_NEXT_ROUND_DELAY_MS)?,
            start_delay: millis("RPS_START_DELAY_MS", DEFAULT_START_DELAY_MS)?,
            max_rounds,
        })
    }
}

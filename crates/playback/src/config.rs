use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::domain::SortingMethod;
use thiserror::Error;

pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 100;
pub const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("fastest delay must be at least 1ms")]
    ZeroFastestDelay,
    #[error("slowest delay {0}ms exceeds the {MAX_DELAY_MS}ms limit")]
    DelayTooLong(u64),
    #[error("slowest delay {slowest_ms}ms must exceed fastest delay {fastest_ms}ms")]
    InvalidDelayBounds { slowest_ms: u64, fastest_ms: u64 },
    #[error("random values must be positive with min <= max, got {min}..={max}")]
    InvalidRandomRange { min: i64, max: i64 },
    #[error("random length {random_len} must be within 1..={max_len}")]
    InvalidRandomLength { random_len: usize, max_len: usize },
    #[error("default speed {0} outside {MIN_SPEED}..={MAX_SPEED}")]
    InvalidDefaultSpeed(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub algorithm: SortingMethod,
    pub max_len: usize,
    pub random_len: usize,
    pub random_min: i64,
    pub random_max: i64,
    pub default_speed: u8,
    pub slowest_delay_ms: u64,
    pub fastest_delay_ms: u64,
    pub seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            algorithm: SortingMethod::Bubble,
            max_len: 14,
            random_len: 14,
            random_min: 2,
            random_max: 16,
            default_speed: 50,
            slowest_delay_ms: 200,
            fastest_delay_ms: 20,
            seed: None,
        }
    }
}

impl PlaybackConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fastest_delay_ms == 0 {
            return Err(ConfigError::ZeroFastestDelay);
        }
        if self.slowest_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::DelayTooLong(self.slowest_delay_ms));
        }
        if self.slowest_delay_ms <= self.fastest_delay_ms {
            return Err(ConfigError::InvalidDelayBounds {
                slowest_ms: self.slowest_delay_ms,
                fastest_ms: self.fastest_delay_ms,
            });
        }
        if self.random_min < 1 || self.random_min > self.random_max {
            return Err(ConfigError::InvalidRandomRange {
                min: self.random_min,
                max: self.random_max,
            });
        }
        if self.random_len == 0 || self.random_len > self.max_len {
            return Err(ConfigError::InvalidRandomLength {
                random_len: self.random_len,
                max_len: self.max_len,
            });
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.default_speed) {
            return Err(ConfigError::InvalidDefaultSpeed(self.default_speed));
        }
        Ok(())
    }

    /// `slowest - (slowest - fastest) * speed / 100`, so speed 100 waits
    /// exactly `fastest_delay_ms` and speed 1 just under `slowest_delay_ms`.
    /// Strictly decreasing over `1..=100` once validated.
    pub fn delay_for_speed(&self, speed: u8) -> Duration {
        let speed = u128::from(speed.clamp(MIN_SPEED, MAX_SPEED));
        let slowest_us = u128::from(self.slowest_delay_ms) * 1_000;
        let span_us = slowest_us.saturating_sub(u128::from(self.fastest_delay_ms) * 1_000);
        let delay_us = slowest_us - span_us * speed / u128::from(MAX_SPEED);
        Duration::from_micros(u64::try_from(delay_us).unwrap_or(u64::MAX))
    }
}

pub fn clamp_speed(raw: i64) -> u8 {
    raw.clamp(i64::from(MIN_SPEED), i64::from(MAX_SPEED)) as u8
}

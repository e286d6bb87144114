//! Runtime configuration read from `BRICK_*` environment variables.

use std::env;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::{tick_interval_ms, MATRIX_HEIGHT, MATRIX_WIDTH};

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub seed: u32,
    pub width: u8,
    pub height: u8,
    /// Fixed tick interval; when unset the interval follows the level table
    pub tick_ms: Option<u32>,
    pub muted: bool,
    /// Capacity of the action queue
    pub max_pending: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            width: MATRIX_WIDTH,
            height: MATRIX_HEIGHT,
            tick_ms: None,
            muted: false,
            max_pending: 32,
        }
    }
}

impl RuntimeConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] with an arbitrary variable source.
    ///
    /// Unparsable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse = |key: &str| -> Option<u64> { parse_var(lookup(key)) };

        let seed = parse("BRICK_SEED")
            .map(|s| s as u32)
            .unwrap_or_else(seed_from_clock);
        let width = parse("BRICK_WIDTH")
            .map(|w| w.clamp(4, 40) as u8)
            .unwrap_or(defaults.width);
        let height = parse("BRICK_HEIGHT")
            .map(|h| h.clamp(4, 60) as u8)
            .unwrap_or(defaults.height);
        let tick_ms = parse("BRICK_TICK_MS")
            .filter(|&ms| ms > 0)
            .map(|ms| ms.min(u32::MAX as u64) as u32);
        let muted = lookup("BRICK_MUTED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(defaults.muted);
        let max_pending = parse("BRICK_MAX_PENDING")
            .map(|n| (n as usize).max(1))
            .unwrap_or(defaults.max_pending);

        Self {
            seed,
            width,
            height,
            tick_ms,
            muted,
            max_pending,
        }
    }

    /// Gravity interval for `level`
    pub fn tick_interval(&self, level: u32) -> Duration {
        let ms = self.tick_ms.unwrap_or_else(|| tick_interval_ms(level));
        Duration::from_millis(ms as u64)
    }
}

fn parse_var<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|s| s.trim().parse().ok())
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() as u32) ^ d.subsec_nanos())
        .unwrap_or(1)
}

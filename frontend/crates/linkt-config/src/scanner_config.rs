use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Poll interval constraints
pub const MIN_POLL_INTERVAL_MS: u64 = 50;
pub const MAX_POLL_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 300;

// Result hold constraints
pub const MIN_RESULT_HOLD_MS: u64 = 500;
pub const MAX_RESULT_HOLD_MS: u64 = 30000;
pub const DEFAULT_RESULT_HOLD_MS: u64 = 3000;

/// Timing of the check-in scan loop.
///
/// Frames are sampled on a fixed interval rather than per rendered frame,
/// and a result stays on screen for `result_hold_ms` before the next
/// distinct code is accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Milliseconds between frame decode attempts
    pub poll_interval_ms: u64,
    /// Milliseconds a validation result is displayed before scanning resumes
    pub result_hold_ms: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            result_hold_ms: DEFAULT_RESULT_HOLD_MS,
        }
    }
}

impl ScannerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn result_hold(&self) -> Duration {
        Duration::from_millis(self.result_hold_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS
            || self.poll_interval_ms > MAX_POLL_INTERVAL_MS
        {
            return Err(ConfigError::scanner(format!(
                "scanner.poll_interval_ms must be {}-{}, got {}",
                MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS, self.poll_interval_ms
            )));
        }

        if self.result_hold_ms < MIN_RESULT_HOLD_MS || self.result_hold_ms > MAX_RESULT_HOLD_MS {
            return Err(ConfigError::scanner(format!(
                "scanner.result_hold_ms must be {}-{}, got {}",
                MIN_RESULT_HOLD_MS, MAX_RESULT_HOLD_MS, self.result_hold_ms
            )));
        }

        if self.result_hold_ms < self.poll_interval_ms {
            return Err(ConfigError::scanner(format!(
                "scanner.result_hold_ms ({}) must not be shorter than scanner.poll_interval_ms ({})",
                self.result_hold_ms, self.poll_interval_ms
            )));
        }

        Ok(())
    }
}

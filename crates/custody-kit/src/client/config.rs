//! Client configuration values.

use std::time::Duration;

/// Default budget for [`AsyncRequest::wait`](crate::AsyncRequest::wait).
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 20_000;

/// Default spacing between status probes.
pub const DEFAULT_WAIT_INTERVAL_MS: u64 = 400;

/// Polling configuration for async requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitConfig {
    /// Total time budget in milliseconds.
    pub timeout_ms: u64,
    /// Delay between status probes in milliseconds.
    pub interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            interval_ms: DEFAULT_WAIT_INTERVAL_MS,
        }
    }
}

impl WaitConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

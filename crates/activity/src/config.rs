//! Activity tracking configuration.

use serde::{Deserialize, Serialize};
use shop_core::limits::{IDLE_CHECK_INTERVAL, IDLE_TIMEOUT, INTERACTION_DEBOUNCE};
use std::time::Duration;

/// Idle timeout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Idle duration before a session is logged out
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// Minimum spacing between interactions that reset the idle clock
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How often each tracker checks for expiry
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
}

fn default_idle_timeout_secs() -> u64 {
    IDLE_TIMEOUT.as_secs()
}

fn default_debounce_ms() -> u64 {
    INTERACTION_DEBOUNCE.as_millis() as u64
}

fn default_check_interval_secs() -> u64 {
    IDLE_CHECK_INTERVAL.as_secs()
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            debounce_ms: default_debounce_ms(),
            check_interval_secs: default_check_interval_secs(),
        }
    }
}

impl ActivityConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs.max(1))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check interval, never longer than the idle timeout.
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs.max(1)).min(self.idle_timeout())
    }
}

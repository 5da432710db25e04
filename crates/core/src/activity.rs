//! Idle tracking state for a signed-in session.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::limits::{IDLE_TIMEOUT, INTERACTION_DEBOUNCE};

/// User interactions that count as activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    PointerMove,
    Click,
    KeyPress,
    Scroll,
    Navigation,
}

impl Interaction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PointerMove => "pointer_move",
            Self::Click => "click",
            Self::KeyPress => "key_press",
            Self::Scroll => "scroll",
            Self::Navigation => "navigation",
        }
    }
}

/// Outcome of an idle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleCheck {
    /// No session is being tracked.
    Inert,
    /// Still within the timeout.
    Active { remaining: Duration },
    /// The timeout elapsed. Reported once per idle period.
    Expired,
}

/// Last-interaction bookkeeping for one session.
///
/// `last_active_at` is `None` whenever nothing is tracked: before `begin`,
/// after `end`, and after an expiry has been reported.
#[derive(Debug, Clone)]
pub struct IdleTimer {
    timeout: Duration,
    debounce: Duration,
    last_active_at: Option<Instant>,
}

impl Default for IdleTimer {
    fn default() -> Self {
        Self::new(IDLE_TIMEOUT, INTERACTION_DEBOUNCE)
    }
}

impl IdleTimer {
    pub fn new(timeout: Duration, debounce: Duration) -> Self {
        Self {
            timeout,
            debounce,
            last_active_at: None,
        }
    }

    /// Start tracking a session at `now`.
    pub fn begin(&mut self, now: Instant) {
        self.last_active_at = Some(now);
    }

    /// Stop tracking.
    pub fn end(&mut self) {
        self.last_active_at = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.last_active_at.is_some()
    }

    pub fn last_active_at(&self) -> Option<Instant> {
        self.last_active_at
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Record an interaction. Returns true if the idle clock was reset.
    ///
    /// Ignored when nothing is tracked or when the previous accepted
    /// interaction is less than the debounce interval ago.
    pub fn record(&mut self, _interaction: Interaction, now: Instant) -> bool {
        let Some(last) = self.last_active_at else {
            return false;
        };

        if now.saturating_duration_since(last) < self.debounce {
            return false;
        }

        self.last_active_at = Some(now);
        true
    }

    /// Compare `now` against the last interaction.
    ///
    /// On expiry tracking stops, so the next check returns `Inert` until
    /// `begin` is called for a new session.
    pub fn check(&mut self, now: Instant) -> IdleCheck {
        let Some(last) = self.last_active_at else {
            return IdleCheck::Inert;
        };

        let idle = now.saturating_duration_since(last);
        if idle >= self.timeout {
            self.last_active_at = None;
            return IdleCheck::Expired;
        }

        IdleCheck::Active {
            remaining: self.timeout - idle,
        }
    }
}

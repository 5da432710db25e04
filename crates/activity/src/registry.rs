//! Trackers for all signed-in sessions seen by the server.

use parking_lot::Mutex;
use shop_core::Interaction;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use telemetry::metrics;
use tracing::debug;

use crate::config::ActivityConfig;
use crate::hook::LogoutHook;
use crate::tracker::ActivityTracker;

/// Session key -> tracker map.
///
/// Only signed-in sessions are ever observed, so anonymous traffic never
/// creates a tracker. Callers must not observe a session that has already
/// been logged out.
pub struct ActivityRegistry {
    trackers: Mutex<HashMap<String, ActivityTracker>>,
    config: ActivityConfig,
    hook: Arc<dyn LogoutHook>,
}

impl ActivityRegistry {
    pub fn new(config: ActivityConfig, hook: Arc<dyn LogoutHook>) -> Self {
        Self {
            trackers: Mutex::new(HashMap::new()),
            config,
            hook,
        }
    }

    /// Record an interaction, starting a tracker on first sight of the session.
    ///
    /// Returns true if the idle clock was (re)started.
    pub fn observe(&self, session_key: &str, interaction: Interaction) -> bool {
        let mut trackers = self.trackers.lock();

        if let Some(tracker) = trackers.get(session_key) {
            if !tracker.is_finished() {
                return tracker.touch(interaction);
            }
        }

        debug!(interaction = interaction.as_str(), "Tracking new session");
        let tracker = ActivityTracker::start(session_key, &self.config, self.hook.clone());
        trackers.insert(session_key.to_string(), tracker);
        metrics().active_trackers.set(trackers.len() as u64);
        true
    }

    /// Stop tracking a session. Returns true if it was tracked.
    pub fn end(&self, session_key: &str) -> bool {
        let mut trackers = self.trackers.lock();
        let removed = trackers.remove(session_key).is_some();
        metrics().active_trackers.set(trackers.len() as u64);
        removed
    }

    pub fn is_tracking(&self, session_key: &str) -> bool {
        self.trackers
            .lock()
            .get(session_key)
            .is_some_and(|tracker| tracker.is_tracking())
    }

    pub fn len(&self) -> usize {
        self.trackers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop trackers whose check task has exited. Returns how many were removed.
    pub fn cleanup_finished(&self) -> usize {
        let mut trackers = self.trackers.lock();
        let before = trackers.len();
        trackers.retain(|_, tracker| !tracker.is_finished());
        metrics().active_trackers.set(trackers.len() as u64);
        before - trackers.len()
    }

    /// Start the periodic cleanup background task.
    /// Returns a handle that can be used to cancel the task.
    pub fn start_cleanup(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let removed = registry.cleanup_finished();
                if removed > 0 {
                    debug!(removed, "Removed finished session trackers");
                }
            }
        })
    }
}

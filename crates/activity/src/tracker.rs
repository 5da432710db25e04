//! Per-session idle tracker.

use parking_lot::Mutex;
use shop_core::{IdleCheck, IdleTimer, Interaction};
use std::sync::Arc;
use std::time::{Duration, Instant};
use telemetry::metrics;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::ActivityConfig;
use crate::hook::LogoutHook;

/// Tracks one signed-in session and logs it out after the idle timeout.
///
/// The check task is aborted when the tracker is dropped.
pub struct ActivityTracker {
    timer: Arc<Mutex<IdleTimer>>,
    handle: JoinHandle<()>,
}

impl ActivityTracker {
    /// Start tracking `session_key` from now.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(
        session_key: impl Into<String>,
        config: &ActivityConfig,
        hook: Arc<dyn LogoutHook>,
    ) -> Self {
        let mut timer = IdleTimer::new(config.idle_timeout(), config.debounce());
        timer.begin(now());
        let timer = Arc::new(Mutex::new(timer));

        let handle = tokio::spawn(run_checks(
            session_key.into(),
            timer.clone(),
            config.check_interval(),
            hook,
        ));

        Self { timer, handle }
    }

    /// Record an interaction. Returns true if the idle clock was reset.
    pub fn touch(&self, interaction: Interaction) -> bool {
        self.timer.lock().record(interaction, now())
    }

    /// Whether the session is still being tracked.
    pub fn is_tracking(&self) -> bool {
        !self.handle.is_finished() && self.timer.lock().is_tracking()
    }

    /// Whether the check task has exited (after a logout or an abort).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ActivityTracker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn run_checks(
    session_key: String,
    timer: Arc<Mutex<IdleTimer>>,
    period: Duration,
    hook: Arc<dyn LogoutHook>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let check = timer.lock().check(now());
        match check {
            IdleCheck::Active { remaining } => {
                debug!(remaining_secs = remaining.as_secs(), "Session active");
            }
            IdleCheck::Expired => {
                info!("Session idle timeout reached, logging out");
                metrics().idle_logouts.inc();
                hook.logout(&session_key).await;
                return;
            }
            IdleCheck::Inert => return,
        }
    }
}

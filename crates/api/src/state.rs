//! Application state shared across handlers.

use activity::{ActivityConfig, ActivityRegistry, LogoutHook};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::cache::PageCache;
use crate::client::CommerceClient;
use crate::config::CacheConfig;

/// Maximum remembered logouts.
const REVOCATION_MAX_CAPACITY: u64 = 100_000;

/// How often finished session trackers are swept (5 minutes).
const TRACKER_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Session keys that have been logged out.
///
/// The cookie itself cannot be cleared from the server once the browser
/// stops talking to us, so a logged-out key is remembered and treated as
/// signed out until the entry expires.
#[derive(Clone)]
pub struct SessionRevocations {
    revoked: Cache<String, ()>,
}

impl SessionRevocations {
    pub fn new(ttl: Duration) -> Self {
        Self {
            revoked: Cache::builder()
                .max_capacity(REVOCATION_MAX_CAPACITY)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn revoke(&self, session_key: &str) {
        self.revoked.insert(session_key.to_string(), ()).await;
    }

    pub async fn is_revoked(&self, session_key: &str) -> bool {
        self.revoked.contains_key(session_key)
    }
}

#[async_trait]
impl LogoutHook for SessionRevocations {
    async fn logout(&self, session_key: &str) {
        self.revoke(session_key).await;
        info!("Idle session logged out");
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Commerce API client
    pub client: CommerceClient,
    /// Rendered page cache
    pub pages: PageCache,
    /// Logged-out session keys
    pub sessions: SessionRevocations,
    /// Idle trackers for signed-in sessions
    pub activity: Arc<ActivityRegistry>,
}

impl AppState {
    pub fn new(client: CommerceClient, cache: &CacheConfig, activity: ActivityConfig) -> Self {
        let sessions = SessionRevocations::new(cache.revocation_ttl());
        let hook: Arc<dyn LogoutHook> = Arc::new(sessions.clone());

        Self {
            client,
            pages: PageCache::new(cache),
            sessions,
            activity: Arc::new(ActivityRegistry::new(activity, hook)),
        }
    }

    /// Start the tracker cleanup background task.
    /// Returns a handle that can be used to cancel the task.
    pub fn start_tracker_cleanup(&self) -> tokio::task::JoinHandle<()> {
        self.activity.start_cleanup(TRACKER_CLEANUP_INTERVAL)
    }
}

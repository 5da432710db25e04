//! Logout side effect invoked when a session goes idle.

use async_trait::async_trait;

/// Ends a session that has been idle for too long.
///
/// Called at most once per tracked session.
#[async_trait]
pub trait LogoutHook: Send + Sync {
    async fn logout(&self, session_key: &str);
}

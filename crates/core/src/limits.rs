//! Fixed limits and defaults for sessions, activity tracking and content.
//!
//! The `#[validate]` derive macro requires literal values in attributes,
//! so the post length limits are duplicated on `NewPost`. Keep both in
//! sync when modifying.

use std::time::Duration;

// === Session ===

/// Name of the cookie carrying the serialized auth store.
pub const SESSION_COOKIE: &str = "user-auth";

/// Idle duration after which a signed-in session is logged out (2 hours).
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

/// Interactions closer together than this only count once.
pub const INTERACTION_DEBOUNCE: Duration = Duration::from_secs(1);

/// How often a tracker compares the clock against the last interaction.
pub const IDLE_CHECK_INTERVAL: Duration = Duration::from_secs(60);

// === Content ===

/// Maximum post title length (chars).
pub const MAX_POST_TITLE_LEN: u64 = 100;

/// Maximum post body length (chars).
pub const MAX_POST_CONTENT_LEN: u64 = 10_000;

/// Default page size for community listings.
pub const DEFAULT_PAGE_LIMIT: u32 = 12;

/// Largest page size forwarded to the commerce API.
pub const MAX_PAGE_LIMIT: u32 = 50;

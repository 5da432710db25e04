//! Idle-session tracking for signed-in users.
//!
//! Each signed-in session gets an [`ActivityTracker`]: a background task
//! that compares the clock against the last recorded interaction and calls
//! a [`LogoutHook`] once the session has been idle for the configured
//! timeout (2 hours by default).

pub mod config;
pub mod hook;
pub mod registry;
pub mod tracker;

pub use config::ActivityConfig;
pub use hook::LogoutHook;
pub use registry::ActivityRegistry;
pub use tracker::ActivityTracker;

//! Request middleware.

pub mod activity;

pub use activity::track_navigation;

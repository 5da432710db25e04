//! Internal telemetry for the plant shop backend.
//!
//! Structured logging via `tracing`, in-process metrics, and a health
//! registry for the commerce API dependency.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;

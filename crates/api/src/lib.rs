//! HTTP layer of the plant shop backend: page shells, action endpoints and
//! the commerce API proxy behind them.

pub mod actions;
pub mod cache;
pub mod client;
pub mod config;
pub mod extractors;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use client::CommerceClient;
pub use config::{CacheConfig, CommerceApiConfig};
pub use routes::router;
pub use state::AppState;

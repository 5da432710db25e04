//! Core types for the plant shop backend: sessions, idle tracking,
//! the commerce API envelope and content records.

pub mod activity;
pub mod envelope;
pub mod error;
pub mod limits;
pub mod models;
pub mod session;

pub use activity::*;
pub use envelope::*;
pub use error::{Error, Resource, Result};
pub use models::*;
pub use session::*;

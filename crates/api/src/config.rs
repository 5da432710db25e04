//! Commerce API and cache configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Commerce API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommerceApiConfig {
    /// Base URL every resource path is appended to (`API_URL`)
    #[serde(default = "default_url")]
    pub url: String,
    /// Tenant identifier sent as the `Client-Id` header (`CLIENT_ID`)
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    "https://fesp-api.koyeb.app/market".to_string()
}

fn default_client_id() -> String {
    "febc13-final12-emjf".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CommerceApiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            client_id: default_client_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CommerceApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Page cache and session revocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a rendered page stays cached
    #[serde(default = "default_page_ttl_secs")]
    pub page_ttl_secs: u64,
    /// Maximum cached pages
    #[serde(default = "default_page_capacity")]
    pub page_capacity: u64,
    /// How long a logged-out session key is remembered
    #[serde(default = "default_revocation_ttl_secs")]
    pub revocation_ttl_secs: u64,
}

fn default_page_ttl_secs() -> u64 {
    60
}

fn default_page_capacity() -> u64 {
    1_000
}

fn default_revocation_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            page_ttl_secs: default_page_ttl_secs(),
            page_capacity: default_page_capacity(),
            revocation_ttl_secs: default_revocation_ttl_secs(),
        }
    }
}

impl CacheConfig {
    pub fn page_ttl(&self) -> Duration {
        Duration::from_secs(self.page_ttl_secs)
    }

    pub fn revocation_ttl(&self) -> Duration {
        Duration::from_secs(self.revocation_ttl_secs)
    }
}

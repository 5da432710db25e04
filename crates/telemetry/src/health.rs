//! Health of the external dependencies.
//!
//! The only dependency is the commerce API. It is probed once at startup
//! and then updated by every proxied call, so the report follows what
//! real traffic sees.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Overall service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// A dependency is down; pages degrade but the service still answers
    Degraded,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
        }
    }
}

#[derive(Debug, Default)]
struct ComponentState {
    healthy: bool,
    message: Option<String>,
    consecutive_failures: u32,
    last_checked: Option<DateTime<Utc>>,
}

/// Health of one dependency. Unknown (unhealthy) until first checked.
#[derive(Debug)]
pub struct ComponentHealth {
    name: &'static str,
    state: RwLock<ComponentState>,
}

impl ComponentHealth {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RwLock::new(ComponentState {
                healthy: false,
                message: None,
                consecutive_failures: 0,
                last_checked: None,
            }),
        }
    }

    pub fn set_healthy(&self) {
        let mut state = self.state.write();
        state.healthy = true;
        state.message = None;
        state.consecutive_failures = 0;
        state.last_checked = Some(Utc::now());
    }

    pub fn set_unhealthy(&self, msg: impl Into<String>) {
        let mut state = self.state.write();
        if state.healthy {
            tracing::warn!(component = self.name, "Dependency became unhealthy");
        }
        state.healthy = false;
        state.message = Some(msg.into());
        state.consecutive_failures = state.consecutive_failures.saturating_add(1);
        state.last_checked = Some(Utc::now());
    }

    pub fn is_healthy(&self) -> bool {
        self.state.read().healthy
    }

    pub fn report(&self) -> ComponentHealthReport {
        let state = self.state.read();
        ComponentHealthReport {
            name: self.name.to_string(),
            healthy: state.healthy,
            message: state.message.clone(),
            consecutive_failures: state.consecutive_failures,
            last_checked: state.last_checked,
        }
    }
}

/// Aggregated health status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub checked_at: DateTime<Utc>,
    pub components: Vec<ComponentHealthReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealthReport {
    pub name: String,
    pub healthy: bool,
    pub message: Option<String>,
    pub consecutive_failures: u32,
    pub last_checked: Option<DateTime<Utc>>,
}

/// Dependencies of the service.
pub struct HealthRegistry {
    pub commerce_api: ComponentHealth,
}

impl HealthRegistry {
    pub const fn new() -> Self {
        Self {
            commerce_api: ComponentHealth::new("commerce_api"),
        }
    }

    pub fn report(&self) -> HealthReport {
        let components = vec![self.commerce_api.report()];
        let status = if components.iter().all(|c| c.healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        HealthReport {
            status,
            checked_at: Utc::now(),
            components,
        }
    }

    /// Pages render degraded states without the commerce API, so the
    /// service always accepts traffic.
    pub fn is_ready(&self) -> bool {
        true
    }
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static HEALTH: HealthRegistry = HealthRegistry::new();

/// The process-wide health registry.
pub fn health() -> &'static HealthRegistry {
    &HEALTH
}

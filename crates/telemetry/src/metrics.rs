//! In-process metrics.
//!
//! Plain atomics read by the health endpoint and by the periodic snapshot
//! log. Nothing is exported to an external system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Last-written value.
#[derive(Debug, Default)]
pub struct Gauge(AtomicU64);

impl Gauge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, val: u64) {
        self.0.store(val, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Upper bounds (ms) of the latency buckets. Slower calls land in an
/// overflow bucket.
const LATENCY_BOUNDS_MS: [u64; 9] = [10, 25, 50, 100, 250, 500, 1_000, 5_000, 30_000];

/// Latency distribution of commerce API calls.
#[derive(Debug, Default)]
pub struct Histogram {
    buckets: [AtomicU64; LATENCY_BOUNDS_MS.len() + 1],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call, in milliseconds.
    pub fn observe(&self, ms: u64) {
        let idx = LATENCY_BOUNDS_MS
            .iter()
            .position(|&bound| ms <= bound)
            .unwrap_or(LATENCY_BOUNDS_MS.len());

        self.buckets[idx].fetch_add(1, Ordering::Relaxed);
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        match self.count() {
            0 => 0.0,
            n => self.sum.load(Ordering::Relaxed) as f64 / n as f64,
        }
    }

    /// Upper bound of the bucket holding the `q` quantile (0.0..=1.0).
    ///
    /// `None` when nothing was recorded or the quantile falls in the
    /// overflow bucket.
    pub fn quantile_bound(&self, q: f64) -> Option<u64> {
        let count = self.count();
        if count == 0 {
            return None;
        }

        let target = ((count as f64) * q.clamp(0.0, 1.0)).ceil().max(1.0) as u64;
        let mut seen = 0;
        for (i, bucket) in self.buckets.iter().enumerate() {
            seen += bucket.load(Ordering::Relaxed);
            if seen >= target {
                return LATENCY_BOUNDS_MS.get(i).copied();
            }
        }
        None
    }
}

/// Metrics of the shop backend.
#[derive(Debug, Default)]
pub struct Metrics {
    // Commerce API proxy
    pub proxy_requests: Counter,
    pub proxy_network_errors: Counter,
    pub proxy_rejections: Counter,
    pub proxy_latency_ms: Histogram,

    // Page cache
    pub page_cache_hits: Counter,
    pub page_cache_misses: Counter,
    pub page_revalidations: Counter,

    // Sessions
    pub idle_logouts: Counter,
    pub explicit_logouts: Counter,
    pub active_trackers: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of page lookups served from the cache.
    pub fn page_cache_hit_ratio(&self) -> f64 {
        let hits = self.page_cache_hits.get();
        match hits + self.page_cache_misses.get() {
            0 => 0.0,
            total => hits as f64 / total as f64,
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            proxy_requests: self.proxy_requests.get(),
            proxy_network_errors: self.proxy_network_errors.get(),
            proxy_rejections: self.proxy_rejections.get(),
            proxy_latency_mean_ms: self.proxy_latency_ms.mean(),
            proxy_latency_p95_ms: self.proxy_latency_ms.quantile_bound(0.95),
            page_cache_hit_ratio: self.page_cache_hit_ratio(),
            page_revalidations: self.page_revalidations.get(),
            idle_logouts: self.idle_logouts.get(),
            explicit_logouts: self.explicit_logouts.get(),
            active_trackers: self.active_trackers.get(),
        }
    }
}

/// Point-in-time copy of [`Metrics`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub proxy_requests: u64,
    pub proxy_network_errors: u64,
    pub proxy_rejections: u64,
    pub proxy_latency_mean_ms: f64,
    pub proxy_latency_p95_ms: Option<u64>,
    pub page_cache_hit_ratio: f64,
    pub page_revalidations: u64,
    pub idle_logouts: u64,
    pub explicit_logouts: u64,
    pub active_trackers: u64,
}

/// Log a snapshot at info level.
pub fn log_snapshot(snapshot: &MetricsSnapshot) {
    tracing::info!(
        proxy_requests = snapshot.proxy_requests,
        proxy_network_errors = snapshot.proxy_network_errors,
        proxy_rejections = snapshot.proxy_rejections,
        proxy_latency_mean_ms = snapshot.proxy_latency_mean_ms,
        proxy_latency_p95_ms = ?snapshot.proxy_latency_p95_ms,
        page_cache_hit_ratio = snapshot.page_cache_hit_ratio,
        page_revalidations = snapshot.page_revalidations,
        idle_logouts = snapshot.idle_logouts,
        explicit_logouts = snapshot.explicit_logouts,
        active_trackers = snapshot.active_trackers,
        "Metrics snapshot"
    );
}

static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// The process-wide metrics.
pub fn metrics() -> &'static Metrics {
    &METRICS
}

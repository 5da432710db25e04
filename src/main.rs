//! Plant shop backend.
//!
//! Serves the page shells and action endpoints of the plant shop:
//! - Session reading from the `user-auth` cookie
//! - Idle auto-logout of signed-in sessions
//! - Proxying content, products and bookmarks to the commerce API
//! - Path-based page cache revalidation after mutations

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use activity::ActivityConfig;
use api::{router, AppState, CacheConfig, CommerceApiConfig, CommerceClient};
use telemetry::{health, init_tracing_from_env, log_snapshot, metrics};

/// How often the metrics snapshot is logged.
const METRICS_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    #[serde(default)]
    api: CommerceApiConfig,

    #[serde(default)]
    cache: CacheConfig,

    #[serde(default)]
    activity: ActivityConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api: CommerceApiConfig::default(),
            cache: CacheConfig::default(),
            activity: ActivityConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting plant shop backend v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    info!(
        api_url = %config.api.url,
        client_id = %config.api.client_id,
        idle_timeout_secs = config.activity.idle_timeout_secs,
        "Loaded configuration"
    );

    let client = CommerceClient::new(&config.api).context("Failed to create commerce API client")?;

    check_health(&client).await;

    let state = AppState::new(client, &config.cache, config.activity.clone());

    let _tracker_cleanup = state.start_tracker_cleanup();
    info!("Started idle tracker cleanup task (every 5 minutes)");

    let _metrics_log = tokio::spawn(async {
        let mut ticker = tokio::time::interval(METRICS_LOG_INTERVAL);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            log_snapshot(&metrics().snapshot());
        }
    });

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log_snapshot(&metrics().snapshot());
    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let env = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect();
    build_config("config/default", env)
}

/// Layer defaults, the config file and `env` (highest wins).
fn build_config(file: &str, env: config::Map<String, String>) -> Result<Config> {
    let mut builder = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?);

    // Deprecated alias only replaces the built-in default
    if !env.contains_key("API_URL") {
        if let Some(url) = env.get("API_SERVER") {
            warn!("API_SERVER is deprecated, use API_URL");
            let alias = HashMap::from([("api", HashMap::from([("url", url.clone())]))]);
            builder = builder.add_source(config::Config::try_from(&alias)?);
        }
    }

    let config = builder
        // Load from config file if exists
        .add_source(
            config::File::with_name(file)
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("PLANT")
                .try_parsing(true)
                .source(Some(env.clone())),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Unprefixed names shared with the storefront deployment
    if let Some(url) = env.get("API_URL") {
        config.api.url = url.clone();
    }
    if let Some(client_id) = env.get("CLIENT_ID") {
        config.api.client_id = client_id.clone();
    }

    Ok(config)
}

/// Probe the commerce API on startup.
async fn check_health(client: &CommerceClient) {
    if client.ping().await {
        health().commerce_api.set_healthy();
        info!("Commerce API connection: healthy");
    } else {
        health().commerce_api.set_unhealthy("Connection failed");
        warn!("Commerce API connection: unhealthy, pages will degrade");
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}

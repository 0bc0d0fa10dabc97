#![forbid(unsafe_code)]

use sitecheck_server::{
    build_router, validate_startup_config_contract, ApiConfig, AppState, HttpAuthProvider,
};
use sitecheck_store::Store;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn config_from_env() -> ApiConfig {
    let defaults = ApiConfig::default();
    ApiConfig {
        bind_addr: env_string("SITECHECK_BIND_ADDR", &defaults.bind_addr),
        database_path: PathBuf::from(env_string("SITECHECK_DB_PATH", "sitecheck.sqlite")),
        auth_base_url: env::var("SITECHECK_AUTH_URL").ok().filter(|v| !v.is_empty()),
        max_body_bytes: env_usize("SITECHECK_MAX_BODY_BYTES", defaults.max_body_bytes),
        request_timeout: Duration::from_millis(env_u64(
            "SITECHECK_REQUEST_TIMEOUT_MS",
            defaults.request_timeout.as_millis() as u64,
        )),
        default_page_size: env_usize("SITECHECK_PAGE_SIZE", defaults.default_page_size),
        max_page_size: env_usize("SITECHECK_MAX_PAGE_SIZE", defaults.max_page_size),
        dashboard_take: env_usize("SITECHECK_DASHBOARD_TAKE", defaults.dashboard_take),
        recent_view_window: Duration::from_secs(env_u64(
            "SITECHECK_RECENT_VIEW_WINDOW_SECS",
            defaults.recent_view_window.as_secs(),
        )),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let api = config_from_env();
    if let Err(e) = validate_startup_config_contract(&api) {
        error!("invalid startup configuration: {e}");
        std::process::exit(2);
    }
    let Some(auth_url) = api.auth_base_url.clone() else {
        error!("SITECHECK_AUTH_URL must point at the identity provider");
        std::process::exit(2);
    };

    let store = match Store::open(&api.database_path) {
        Ok(store) => store,
        Err(e) => {
            error!("failed to open store at {}: {e}", api.database_path.display());
            std::process::exit(1);
        }
    };

    let auth = Arc::new(HttpAuthProvider::new(auth_url));
    let bind_addr = api.bind_addr.clone();
    let state = AppState::with_config(store, auth, api);
    let app = build_router(state);

    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {bind_addr}: {e}");
            std::process::exit(1);
        }
    };
    info!("sitecheck-server listening on {bind_addr}");
    if let Err(e) = axum::serve(listener, app).await {
        error!("server exited with error: {e}");
        std::process::exit(1);
    }
}

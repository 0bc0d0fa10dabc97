#![forbid(unsafe_code)]

//! HTTP surface for the sitecheck checklist service.
//!
//! State is explicit: the store handle and the auth provider are
//! constructed by the caller and injected through [`AppState`]. There is
//! no module-global client anywhere in the workspace.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch};
use axum::Router;
use sitecheck_store::Store;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;
use tokio::sync::Mutex;

mod auth;
mod config;
mod http;
mod metrics;
mod middleware;
mod services;

pub const CRATE_NAME: &str = "sitecheck-server";

pub use auth::{
    bearer_token, AuthError, AuthIdentity, AuthProvider, FakeAuthProvider, HttpAuthProvider,
};
pub use config::{validate_startup_config_contract, ApiConfig, CONFIG_SCHEMA_VERSION};

use metrics::RequestMetrics;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
    pub auth: Arc<dyn AuthProvider>,
    pub api: ApiConfig,
    pub ready: Arc<AtomicBool>,
    pub(crate) metrics: Arc<RequestMetrics>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Store, auth: Arc<dyn AuthProvider>) -> Self {
        Self::with_config(store, auth, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Store, auth: Arc<dyn AuthProvider>, api: ApiConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            auth,
            api,
            ready: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::healthz_handler))
        .route("/readyz", get(http::readyz_handler))
        .route("/metrics", get(http::metrics_handler))
        .route("/v1/version", get(http::version_handler))
        .route(
            "/v1/checklists",
            get(http::checklists::list_checklists_handler)
                .post(http::checklists::create_checklist_handler),
        )
        .route(
            "/v1/checklists/:checklist_id",
            get(http::checklists::checklist_detail_handler)
                .delete(http::checklists::delete_checklist_handler),
        )
        .route(
            "/v1/checklists/:checklist_id/archive",
            axum::routing::post(http::checklists::archive_checklist_handler),
        )
        .route(
            "/v1/checklists/:checklist_id/restore",
            axum::routing::post(http::checklists::restore_checklist_handler),
        )
        .route(
            "/v1/checklists/:checklist_id/items",
            get(http::items::list_items_handler)
                .post(http::items::create_item_handler)
                .patch(http::items::update_items_status_handler),
        )
        .route(
            "/v1/checklists/:checklist_id/items/:item_id/status",
            patch(http::items::update_item_status_handler),
        )
        .route(
            "/v1/notifications",
            get(http::notifications::list_notifications_handler)
                .post(http::notifications::generate_notifications_handler),
        )
        .route("/v1/dashboard", get(http::dashboard::dashboard_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}

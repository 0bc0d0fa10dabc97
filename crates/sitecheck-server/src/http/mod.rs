// SPDX-License-Identifier: Apache-2.0

//! HTTP support shared by every handler: the error envelope, request-id
//! plumbing, the authentication gate, and the small system endpoints.

pub(crate) mod checklists;
pub(crate) mod dashboard;
pub(crate) mod items;
pub(crate) mod notifications;

use crate::{AppState, AuthError};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sitecheck_api::ApiError;
use sitecheck_core::UserId;
use sitecheck_model::User;
use sitecheck_query::QueryError;
use sitecheck_store::StoreError;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::error;

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(err.code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"error": err}))).into_response()
}

/// Map a store failure onto the wire taxonomy. Persistence details go to
/// the log with full context; the response stays generic.
pub(crate) fn store_error(err: &StoreError) -> ApiError {
    match err {
        StoreError::NotFoundOrUnauthorized => ApiError::not_found(),
        StoreError::Constraint(msg) => ApiError::validation_failed("request", msg.clone()),
        StoreError::Persistence(cause) => {
            error!(error = %cause, "persistence failure");
            ApiError::internal()
        }
        _ => {
            error!("unrecognized store error");
            ApiError::internal()
        }
    }
}

pub(crate) fn query_error(err: &QueryError) -> ApiError {
    error!(error = %err, "listing query failed");
    ApiError::internal()
}

pub(crate) fn make_request_id(state: &AppState) -> String {
    let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
    format!("req-{id:016x}")
}

pub(crate) fn propagated_request_id(headers: &HeaderMap, state: &AppState) -> String {
    if let Some(raw) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    make_request_id(state)
}

pub(crate) fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Observe the response for `route` and stamp the request id. Every
/// handler funnels its exit through here.
pub(crate) async fn finish(
    state: &AppState,
    route: &'static str,
    request_id: &str,
    started: Instant,
    response: Response,
) -> Response {
    state
        .metrics
        .observe_request(route, response.status(), started.elapsed())
        .await;
    with_request_id(response, request_id)
}

/// The authentication gate: verify the bearer token against the identity
/// provider, then upsert the internal user row. Runs before any core
/// logic; a missing or bad token never reaches the store. Returns the
/// internal owner id every downstream ownership check keys on.
pub(crate) async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<UserId, ApiError> {
    let Some(token) = crate::auth::bearer_token(headers) else {
        return Err(ApiError::unauthenticated());
    };
    let identity = state.auth.verify(token).await.map_err(|e| match e {
        AuthError::InvalidToken => ApiError::unauthenticated(),
        AuthError::Provider(msg) => {
            error!(error = %msg, "identity provider unavailable");
            ApiError::internal()
        }
    })?;
    let user: User = {
        let mut store = state.store.lock().await;
        store
            .upsert_user(&identity.subject, &identity.name)
            .map_err(|e| store_error(&e))?
    };
    UserId::new(user.id).map_err(|_| ApiError::internal())
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let resp = (StatusCode::OK, "ok").into_response();
    finish(&state, "/healthz", &request_id, started, resp).await
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let store_ok = {
        let store = state.store.lock().await;
        store
            .conn()
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .is_ok()
    };
    let resp = if state.ready.load(Ordering::Relaxed) && store_ok {
        (StatusCode::OK, "ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not-ready").into_response()
    };
    finish(&state, "/readyz", &request_id, started, resp).await
}

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let body = state.metrics.render().await;
    let resp = (StatusCode::OK, body).into_response();
    finish(&state, "/metrics", &request_id, started, resp).await
}

pub(crate) async fn version_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let payload = json!({
        "name": "sitecheck",
        "version": env!("CARGO_PKG_VERSION"),
        "crate": crate::CRATE_NAME,
        "config_schema_version": crate::config::CONFIG_SCHEMA_VERSION,
    });
    let resp = Json(payload).into_response();
    finish(&state, "/v1/version", &request_id, started, resp).await
}

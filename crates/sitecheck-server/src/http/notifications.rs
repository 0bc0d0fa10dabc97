// SPDX-License-Identifier: Apache-2.0

use super::{api_error_response, authenticate, finish, propagated_request_id, store_error};
use crate::services::reminders;
use crate::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sitecheck_core::time::today_local;
use std::time::Instant;
use tracing::info;

/// POST `/v1/notifications` — run the daily reminder generation for the
/// requester's checklists whose work date is today. Repeated calls append
/// fresh rows; deduplication is the caller's policy.
pub(crate) async fn generate_notifications_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    const ROUTE: &str = "/v1/notifications";
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let owner = match authenticate(&state, &headers).await {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let generated = {
        let mut store = state.store.lock().await;
        reminders::generate_daily(&mut store, owner, today_local())
    };
    let resp = match generated {
        Ok(notifications) => {
            info!(
                request_id = %request_id,
                generated = notifications.len(),
                "daily reminders generated"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "generated": notifications.len(),
                    "notifications": notifications,
                })),
            )
                .into_response()
        }
        Err(e) => api_error_response(store_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

pub(crate) async fn list_notifications_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    const ROUTE: &str = "/v1/notifications";
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let owner = match authenticate(&state, &headers).await {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let notifications = {
        let mut store = state.store.lock().await;
        store.list_notifications(owner)
    };
    let resp = match notifications {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => api_error_response(store_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

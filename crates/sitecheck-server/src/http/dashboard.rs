// SPDX-License-Identifier: Apache-2.0

use super::{
    api_error_response, authenticate, finish, propagated_request_id, query_error, store_error,
};
use crate::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Duration as ChronoDuration;
use serde_json::json;
use sitecheck_core::time::{now, today_local};
use sitecheck_query::{
    query_checklists, ChecklistFilter, ChecklistQueryRequest, SortField, SortOrder,
};
use std::time::Instant;

/// GET `/v1/dashboard` — today's checklists (by work date, earliest
/// first) and the recently viewed ones, both annotated with counts.
pub(crate) async fn dashboard_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    const ROUTE: &str = "/v1/dashboard";
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let owner = match authenticate(&state, &headers).await {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };

    let today = today_local();
    let today_request = ChecklistQueryRequest {
        filter: ChecklistFilter {
            date_from: Some(today),
            date_to: Some(today),
            ..ChecklistFilter::default()
        },
        sort_by: SortField::WorkDate,
        sort_order: SortOrder::Asc,
        limit: state.api.dashboard_take,
    };
    let today_rows = {
        let store = state.store.lock().await;
        query_checklists(store.conn(), owner.get(), &today_request)
    };
    let today_rows = match today_rows {
        Ok(rows) => rows,
        Err(e) => {
            return finish(
                &state,
                ROUTE,
                &request_id,
                started,
                api_error_response(query_error(&e)),
            )
            .await
        }
    };

    let window = ChronoDuration::from_std(state.api.recent_view_window)
        .unwrap_or_else(|_| ChronoDuration::hours(48));
    let recent = {
        let mut store = state.store.lock().await;
        store.recently_viewed(owner, now() - window, state.api.dashboard_take)
    };
    let resp = match recent {
        Ok(recent_rows) => Json(json!({
            "todayChecklists": today_rows,
            "recentChecklists": recent_rows,
        }))
        .into_response(),
        Err(e) => api_error_response(store_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

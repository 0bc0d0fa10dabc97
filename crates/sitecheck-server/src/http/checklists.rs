// SPDX-License-Identifier: Apache-2.0

use super::{
    api_error_response, authenticate, finish, propagated_request_id, query_error, store_error,
};
use crate::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sitecheck_api::params::parse_list_checklists_params_with_limit;
use sitecheck_api::{decode_body, ApiError, CreateChecklistRequest};
use sitecheck_core::ChecklistId;
use sitecheck_query::query_checklists;
use sitecheck_store::NewChecklist;
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

pub(crate) fn parse_checklist_id(raw: &str) -> Result<ChecklistId, ApiError> {
    ChecklistId::parse(raw).map_err(|e| ApiError::validation_failed("checklistId", e.to_string()))
}

pub(crate) async fn list_checklists_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::Query(params): axum::extract::Query<HashMap<String, String>>,
) -> Response {
    const ROUTE: &str = "/v1/checklists";
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let owner = match authenticate(&state, &headers).await {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let req = match parse_list_checklists_params_with_limit(
        &params,
        state.api.default_page_size,
        state.api.max_page_size,
    ) {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let rows = {
        let store = state.store.lock().await;
        query_checklists(store.conn(), owner.get(), &req)
    };
    let resp = match rows {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => api_error_response(query_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

pub(crate) async fn create_checklist_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Response {
    const ROUTE: &str = "/v1/checklists";
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let owner = match authenticate(&state, &headers).await {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let new = match parse_new_checklist(&body) {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let created = {
        let mut store = state.store.lock().await;
        store.create_checklist(owner, &new)
    };
    let resp = match created {
        Ok(checklist) => {
            info!(request_id = %request_id, checklist_id = checklist.id, "checklist created");
            (StatusCode::CREATED, Json(checklist)).into_response()
        }
        Err(e) => api_error_response(store_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

fn parse_new_checklist(body: &[u8]) -> Result<NewChecklist, ApiError> {
    let req: CreateChecklistRequest = decode_body(body)?;
    Ok(NewChecklist {
        name: req.validated_name()?,
        site_name: req.validated_site_name()?,
        work_date: req.validated_work_date()?,
        description: req.description.clone(),
        is_template: req.is_template,
    })
}

pub(crate) async fn checklist_detail_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::Path(checklist_id): axum::extract::Path<String>,
) -> Response {
    const ROUTE: &str = "/v1/checklists/{checklistId}";
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let owner = match authenticate(&state, &headers).await {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let checklist_id = match parse_checklist_id(&checklist_id) {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let detail = {
        let mut store = state.store.lock().await;
        store.checklist_detail(checklist_id, owner)
    };
    let resp = match detail {
        Ok(detail) => Json(json!({
            "checklist": detail.checklist,
            "items": detail.items,
            "summary": detail.summary,
        }))
        .into_response(),
        Err(e) => api_error_response(store_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

pub(crate) async fn archive_checklist_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::Path(checklist_id): axum::extract::Path<String>,
) -> Response {
    const ROUTE: &str = "/v1/checklists/{checklistId}/archive";
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let owner = match authenticate(&state, &headers).await {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let checklist_id = match parse_checklist_id(&checklist_id) {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let archived = {
        let mut store = state.store.lock().await;
        store.archive_checklist(checklist_id, owner)
    };
    let resp = match archived {
        Ok(checklist) => Json(checklist).into_response(),
        Err(e) => api_error_response(store_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

pub(crate) async fn restore_checklist_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::Path(checklist_id): axum::extract::Path<String>,
) -> Response {
    const ROUTE: &str = "/v1/checklists/{checklistId}/restore";
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let owner = match authenticate(&state, &headers).await {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let checklist_id = match parse_checklist_id(&checklist_id) {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let restored = {
        let mut store = state.store.lock().await;
        store.restore_checklist(checklist_id, owner)
    };
    let resp = match restored {
        Ok(checklist) => Json(checklist).into_response(),
        Err(e) => api_error_response(store_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

pub(crate) async fn delete_checklist_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::Path(checklist_id): axum::extract::Path<String>,
) -> Response {
    const ROUTE: &str = "/v1/checklists/{checklistId}";
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let owner = match authenticate(&state, &headers).await {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let checklist_id = match parse_checklist_id(&checklist_id) {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let deleted = {
        let mut store = state.store.lock().await;
        store.delete_checklist(checklist_id, owner)
    };
    let resp = match deleted {
        Ok(()) => Json(json!({"deleted": true})).into_response(),
        Err(e) => api_error_response(store_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

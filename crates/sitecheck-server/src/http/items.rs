// SPDX-License-Identifier: Apache-2.0

use super::checklists::parse_checklist_id;
use super::{api_error_response, authenticate, finish, propagated_request_id, store_error};
use crate::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sitecheck_api::{
    decode_body, ApiError, CreateItemRequest, UpdateItemStatusRequest, UpdateItemsStatusRequest,
};
use sitecheck_core::{CategoryId, ItemId};
use sitecheck_store::NewItem;
use std::time::Instant;
use tracing::info;

fn parse_item_id(raw: &str) -> Result<ItemId, ApiError> {
    ItemId::parse(raw).map_err(|e| ApiError::validation_failed("itemId", e.to_string()))
}

pub(crate) async fn list_items_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::Path(checklist_id): axum::extract::Path<String>,
) -> Response {
    const ROUTE: &str = "/v1/checklists/{checklistId}/items";
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
    let items = {
        let mut store = state.store.lock().await;
        store.list_items(checklist_id, owner)
    };
    let resp = match items {
        Ok(items) => Json(items).into_response(),
        Err(e) => api_error_response(store_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

pub(crate) async fn create_item_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::Path(checklist_id): axum::extract::Path<String>,
    body: axum::body::Bytes,
) -> Response {
    const ROUTE: &str = "/v1/checklists/{checklistId}/items";
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
    let new = match parse_new_item(&body) {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let created = {
        let mut store = state.store.lock().await;
        store.create_item(checklist_id, owner, &new)
    };
    let resp = match created {
        Ok(update) => {
            info!(
                request_id = %request_id,
                checklist_id = checklist_id.get(),
                item_id = update.item.item.id,
                "item created"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "item": update.item,
                    "checklist": update.checklist,
                    "summary": update.summary,
                })),
            )
                .into_response()
        }
        Err(e) => api_error_response(store_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

fn parse_new_item(body: &[u8]) -> Result<NewItem, ApiError> {
    let req: CreateItemRequest = decode_body(body)?;
    let category_id = CategoryId::new(req.category_id)
        .map_err(|e| ApiError::validation_failed("categoryId", e.to_string()))?;
    Ok(NewItem {
        name: req.validated_name()?,
        status: req.validated_status()?,
        description: req.description.clone(),
        category_id,
        quantity: req.quantity,
        unit: req.unit.clone(),
        memo: req.memo.clone(),
    })
}

/// PATCH `/v1/checklists/{id}/items/{itemId}/status` — the single-item
/// form of the transactional updater.
pub(crate) async fn update_item_status_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::Path((checklist_id, item_id)): axum::extract::Path<(String, String)>,
    body: axum::body::Bytes,
) -> Response {
    const ROUTE: &str = "/v1/checklists/{checklistId}/items/{itemId}/status";
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let owner = match authenticate(&state, &headers).await {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let parsed = parse_checklist_id(&checklist_id)
        .and_then(|cid| parse_item_id(&item_id).map(|iid| (cid, iid)));
    let (checklist_id, item_id) = match parsed {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let status = match decode_body::<UpdateItemStatusRequest>(&body)
        .and_then(|req| req.validated_status())
    {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let updated = {
        let mut store = state.store.lock().await;
        store.update_item_status(checklist_id, item_id, status, owner)
    };
    let resp = match updated {
        Ok(update) => {
            info!(
                request_id = %request_id,
                checklist_id = checklist_id.get(),
                item_id = item_id.get(),
                status = %status,
                checklist_status = %update.checklist.status,
                "item status updated"
            );
            Json(json!({
                "item": update.item,
                "checklist": update.checklist,
                "summary": update.summary,
            }))
            .into_response()
        }
        Err(e) => api_error_response(store_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

/// PATCH `/v1/checklists/{id}/items` — bulk status update, all-or-nothing.
pub(crate) async fn update_items_status_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::Path(checklist_id): axum::extract::Path<String>,
    body: axum::body::Bytes,
) -> Response {
    const ROUTE: &str = "/v1/checklists/{checklistId}/items";
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
    let (status, item_ids) = match decode_body::<UpdateItemsStatusRequest>(&body)
        .and_then(|req| req.validated_status().map(|s| (s, req.item_ids)))
    {
        Ok(v) => v,
        Err(e) => {
            return finish(&state, ROUTE, &request_id, started, api_error_response(e)).await
        }
    };
    let updated = {
        let mut store = state.store.lock().await;
        store.update_items_status(checklist_id, &item_ids, status, owner)
    };
    let resp = match updated {
        Ok(update) => {
            info!(
                request_id = %request_id,
                checklist_id = checklist_id.get(),
                requested = item_ids.len(),
                applied = update.items.len(),
                status = %status,
                checklist_status = %update.checklist.status,
                "item statuses updated"
            );
            Json(json!({
                "items": update.items,
                "checklist": update.checklist,
                "summary": update.summary,
            }))
            .into_response()
        }
        Err(e) => api_error_response(store_error(&e)),
    };
    finish(&state, ROUTE, &request_id, started, resp).await
}

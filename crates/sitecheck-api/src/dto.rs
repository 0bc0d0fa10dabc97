// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sitecheck_core::time::{day_start, parse_calendar_date};
use sitecheck_model::Status;

pub const NAME_MAX_LEN: usize = 256;

/// Decode a JSON request body, mapping malformed input to the wire
/// validation error instead of a framework default.
pub fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes)
        .map_err(|e| ApiError::validation_failed("body", e.to_string()))
}

fn required_name(field: &'static str, raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation_failed(field, "must not be empty"));
    }
    if trimmed.len() > NAME_MAX_LEN {
        return Err(ApiError::validation_failed(
            field,
            format!("exceeds max length {NAME_MAX_LEN}"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Work dates arrive either as a full RFC 3339 timestamp or as a bare
/// calendar date, which means local midnight.
fn parse_work_date(field: &'static str, raw: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    parse_calendar_date(field, raw)
        .map(day_start)
        .map_err(|_| ApiError::validation_failed(field, "expected YYYY-MM-DD or RFC 3339"))
}

fn parse_status_field(field: &'static str, raw: &str) -> Result<Status, ApiError> {
    Status::parse(raw).map_err(|e| ApiError::validation_failed(field, e.to_string()))
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateChecklistRequest {
    pub name: String,
    pub description: Option<String>,
    pub site_name: String,
    pub work_date: String,
    #[serde(default)]
    pub is_template: bool,
}

impl CreateChecklistRequest {
    pub fn validated_name(&self) -> Result<String, ApiError> {
        required_name("name", &self.name)
    }

    pub fn validated_site_name(&self) -> Result<String, ApiError> {
        required_name("siteName", &self.site_name)
    }

    pub fn validated_work_date(&self) -> Result<DateTime<Utc>, ApiError> {
        parse_work_date("workDate", &self.work_date)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub category_id: i64,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub memo: Option<String>,
    pub status: Option<String>,
}

impl CreateItemRequest {
    pub fn validated_name(&self) -> Result<String, ApiError> {
        required_name("name", &self.name)
    }

    pub fn validated_status(&self) -> Result<Option<Status>, ApiError> {
        self.status
            .as_deref()
            .map(|raw| parse_status_field("status", raw))
            .transpose()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemStatusRequest {
    pub status: String,
}

impl UpdateItemStatusRequest {
    pub fn validated_status(&self) -> Result<Status, ApiError> {
        parse_status_field("status", &self.status)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemsStatusRequest {
    pub status: String,
    pub item_ids: Vec<i64>,
}

impl UpdateItemsStatusRequest {
    pub fn validated_status(&self) -> Result<Status, ApiError> {
        parse_status_field("status", &self.status)
    }
}

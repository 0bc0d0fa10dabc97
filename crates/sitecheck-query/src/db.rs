// SPDX-License-Identifier: Apache-2.0

use crate::filters::{escape_like, normalize_search, ChecklistQueryRequest};
use rusqlite::types::Value;
use sitecheck_core::time::{day_end_exclusive, day_start, encode_timestamp};
use sitecheck_model::Status;

/// Assemble the listing SQL and its parameter vector.
///
/// User input only ever lands in the params vec; the sort column and
/// direction come from the closed enums, never from the raw request.
/// Counts are derived from the item set at query time.
#[must_use]
pub fn build_sql(owner_id: i64, req: &ChecklistQueryRequest) -> (String, Vec<Value>) {
    let mut sql = format!(
        "SELECT c.id, c.name, c.description, c.site_name, c.work_date, c.is_template, \
         c.archived_at, c.status, c.user_id, c.created_at, c.updated_at, c.last_viewed_at, \
         COUNT(i.id) AS total_items, \
         COALESCE(SUM(CASE WHEN i.status = '{}' THEN 1 ELSE 0 END), 0) AS completed_items \
         FROM checklists c \
         LEFT JOIN checklist_items i ON i.checklist_id = c.id",
        Status::Completed.as_str()
    );
    let mut where_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    where_parts.push("c.user_id = ?".to_string());
    params.push(Value::Integer(owner_id));

    if req.filter.is_archived {
        where_parts.push("c.archived_at IS NOT NULL".to_string());
    } else {
        where_parts.push("c.archived_at IS NULL".to_string());
    }
    if let Some(is_template) = req.filter.is_template {
        where_parts.push("c.is_template = ?".to_string());
        params.push(Value::Integer(i64::from(is_template)));
    }
    if let Some(status) = req.filter.status {
        where_parts.push("c.status = ?".to_string());
        params.push(Value::Text(status.as_str().to_string()));
    }
    if let Some(search) = &req.filter.search {
        let needle = format!("%{}%", escape_like(&normalize_search(search)));
        where_parts.push(
            "(c.name_search LIKE ? ESCAPE '!' OR c.site_search LIKE ? ESCAPE '!')".to_string(),
        );
        params.push(Value::Text(needle.clone()));
        params.push(Value::Text(needle));
    }
    if let Some(from) = req.filter.date_from {
        where_parts.push("c.work_date >= ?".to_string());
        params.push(Value::Text(encode_timestamp(day_start(from))));
    }
    if let Some(to) = req.filter.date_to {
        // Inclusive end date: everything strictly before the next day.
        where_parts.push("c.work_date < ?".to_string());
        params.push(Value::Text(encode_timestamp(day_end_exclusive(to))));
    }

    sql.push_str(" WHERE ");
    sql.push_str(&where_parts.join(" AND "));
    sql.push_str(" GROUP BY c.id");
    sql.push_str(&format!(
        " ORDER BY c.{} {}, c.id {}",
        req.sort_by.column(),
        req.sort_order.keyword(),
        req.sort_order.keyword()
    ));
    sql.push_str(" LIMIT ?");
    params.push(Value::Integer(req.limit as i64));

    (sql, params)
}

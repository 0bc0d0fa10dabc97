// SPDX-License-Identifier: Apache-2.0

//! Row decoding for the store's own SELECT projections. Column orders are
//! fixed by the `*_COLUMNS` constants; every query in this crate selects
//! through them.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use sitecheck_core::time::decode_timestamp;
use sitecheck_model::{Category, Checklist, Item, ItemWithCategory, Notification, Status, User};

pub(crate) const CHECKLIST_COLUMNS: &str = "id, name, description, site_name, work_date, \
     is_template, archived_at, status, user_id, created_at, updated_at, last_viewed_at";

pub(crate) const ITEM_JOIN_COLUMNS: &str = "i.id, i.checklist_id, i.category_id, i.name, \
     i.description, i.quantity, i.unit, i.memo, i.status, i.completed_at, i.user_id, \
     i.created_at, i.updated_at, \
     c.id, c.name, c.description, c.display_order, c.created_at, c.updated_at";

pub(crate) const USER_COLUMNS: &str = "id, subject, name, role, created_at, updated_at";

pub(crate) const NOTIFICATION_COLUMNS: &str =
    "id, user_id, checklist_id, kind, title, message, created_at";

fn conversion_err(idx: usize, err: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn timestamp_at(row: &Row<'_>, idx: usize, field: &'static str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    decode_timestamp(field, &raw).map_err(|e| conversion_err(idx, e))
}

fn opt_timestamp_at(
    row: &Row<'_>,
    idx: usize,
    field: &'static str,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|value| decode_timestamp(field, &value).map_err(|e| conversion_err(idx, e)))
        .transpose()
}

fn status_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Status> {
    let raw: String = row.get(idx)?;
    Status::parse(&raw).map_err(|e| conversion_err(idx, e))
}

pub(crate) fn checklist_from_row(row: &Row<'_>) -> rusqlite::Result<Checklist> {
    Ok(Checklist {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        site_name: row.get(3)?,
        work_date: timestamp_at(row, 4, "work_date")?,
        is_template: row.get(5)?,
        archived_at: opt_timestamp_at(row, 6, "archived_at")?,
        status: status_at(row, 7)?,
        user_id: row.get(8)?,
        created_at: timestamp_at(row, 9, "created_at")?,
        updated_at: timestamp_at(row, 10, "updated_at")?,
        last_viewed_at: opt_timestamp_at(row, 11, "last_viewed_at")?,
    })
}

pub(crate) fn item_with_category_from_row(row: &Row<'_>) -> rusqlite::Result<ItemWithCategory> {
    let item = Item {
        id: row.get(0)?,
        checklist_id: row.get(1)?,
        category_id: row.get(2)?,
        name: row.get(3)?,
        description: row.get(4)?,
        quantity: row.get(5)?,
        unit: row.get(6)?,
        memo: row.get(7)?,
        status: status_at(row, 8)?,
        completed_at: opt_timestamp_at(row, 9, "completed_at")?,
        user_id: row.get(10)?,
        created_at: timestamp_at(row, 11, "created_at")?,
        updated_at: timestamp_at(row, 12, "updated_at")?,
    };
    let category = Category {
        id: row.get(13)?,
        name: row.get(14)?,
        description: row.get(15)?,
        display_order: row.get(16)?,
        created_at: timestamp_at(row, 17, "created_at")?,
        updated_at: timestamp_at(row, 18, "updated_at")?,
    };
    Ok(ItemWithCategory { item, category })
}

pub(crate) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        subject: row.get(1)?,
        name: row.get(2)?,
        role: row.get(3)?,
        created_at: timestamp_at(row, 4, "created_at")?,
        updated_at: timestamp_at(row, 5, "updated_at")?,
    })
}

pub(crate) fn notification_from_row(row: &Row<'_>) -> rusqlite::Result<Notification> {
    let raw_message: String = row.get(5)?;
    let message = serde_json::from_str(&raw_message).map_err(|e| conversion_err(5, e))?;
    Ok(Notification {
        id: row.get(0)?,
        user_id: row.get(1)?,
        checklist_id: row.get(2)?,
        kind: row.get(3)?,
        title: row.get(4)?,
        message,
        created_at: timestamp_at(row, 6, "created_at")?,
    })
}

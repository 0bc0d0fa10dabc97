// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use sitecheck_core::time::decode_timestamp;
use sitecheck_model::{Checklist, ChecklistSummary, Status};

use crate::executor::ChecklistWithCounts;

fn timestamp_at(row: &Row<'_>, idx: usize, field: &'static str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    decode_timestamp(field, &raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn opt_timestamp_at(
    row: &Row<'_>,
    idx: usize,
    field: &'static str,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|value| {
        decode_timestamp(field, &value)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

fn status_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Status> {
    let raw: String = row.get(idx)?;
    Status::parse(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Decode one row of the listing projection built by [`crate::build_sql`].
/// Column order must stay in lockstep with the SELECT list there.
pub(crate) fn checklist_with_counts_from_row(
    row: &Row<'_>,
) -> rusqlite::Result<ChecklistWithCounts> {
    let checklist = Checklist {
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
    };
    let total_items: i64 = row.get(12)?;
    let completed_items: i64 = row.get(13)?;
    Ok(ChecklistWithCounts {
        checklist,
        summary: ChecklistSummary {
            completed_items: completed_items.max(0) as u64,
            total_items: total_items.max(0) as u64,
        },
    })
}

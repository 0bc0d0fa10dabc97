// SPDX-License-Identifier: Apache-2.0

use crate::authorize::authorize_checklist;
use crate::error::StoreError;
use crate::items::{items_for_checklist, load_checklist, sibling_statuses, summary_of};
use crate::row::{checklist_from_row, CHECKLIST_COLUMNS};
use crate::store::Store;
use chrono::{DateTime, Utc};
use rusqlite::params;
use sitecheck_core::time::{encode_timestamp, now};
use sitecheck_core::{ChecklistId, UserId};
use sitecheck_model::{
    aggregate_status, Checklist, ChecklistSummary, ItemWithCategory, ReminderItem,
};
use sitecheck_query::{normalize_search, ChecklistWithCounts};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChecklist {
    pub name: String,
    pub description: Option<String>,
    pub site_name: String,
    pub work_date: DateTime<Utc>,
    pub is_template: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistDetail {
    pub checklist: Checklist,
    pub items: Vec<ItemWithCategory>,
    pub summary: ChecklistSummary,
}

/// One checklist worth of reminder content for the daily generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSource {
    pub checklist: Checklist,
    pub items: Vec<ReminderItem>,
}

impl Store {
    /// Create a checklist for `owner`. The stored status is derived from
    /// the (empty) item set, never taken from the client.
    pub fn create_checklist(
        &mut self,
        owner: UserId,
        new: &NewChecklist,
    ) -> Result<Checklist, StoreError> {
        let stamp = encode_timestamp(now());
        let status = aggregate_status(&[]);
        self.conn().execute(
            "INSERT INTO checklists (name, description, site_name, work_date, is_template, \
             status, user_id, created_at, updated_at, name_search, site_search) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8, ?9, ?10)",
            params![
                new.name,
                new.description,
                new.site_name,
                encode_timestamp(new.work_date),
                new.is_template,
                status.as_str(),
                owner.get(),
                stamp,
                normalize_search(&new.name),
                normalize_search(&new.site_name),
            ],
        )?;
        let id = self.conn().last_insert_rowid();
        info!(checklist_id = id, owner = owner.get(), "checklist created");
        load_checklist(self.conn(), id)
    }

    /// Owned detail view: checklist, items with categories, counts.
    /// Stamps `last_viewed_at` as a side effect of viewing.
    pub fn checklist_detail(
        &mut self,
        checklist_id: ChecklistId,
        owner: UserId,
    ) -> Result<ChecklistDetail, StoreError> {
        let viewed = now();
        let tx = self.immediate_tx()?;
        authorize_checklist(&tx, checklist_id, owner)?;
        tx.execute(
            "UPDATE checklists SET last_viewed_at = ?1 WHERE id = ?2",
            params![encode_timestamp(viewed), checklist_id.get()],
        )?;
        let checklist = load_checklist(&tx, checklist_id.get())?;
        let items = items_for_checklist(&tx, checklist_id.get())?;
        let statuses = sibling_statuses(&tx, checklist_id.get())?;
        let summary = summary_of(&statuses);
        tx.commit()?;
        Ok(ChecklistDetail {
            checklist,
            items,
            summary,
        })
    }

    /// Move an owned checklist into the archive. Idempotent: archiving
    /// an already-archived checklist keeps the original timestamp.
    pub fn archive_checklist(
        &mut self,
        checklist_id: ChecklistId,
        owner: UserId,
    ) -> Result<Checklist, StoreError> {
        let stamp = encode_timestamp(now());
        let tx = self.immediate_tx()?;
        authorize_checklist(&tx, checklist_id, owner)?;
        tx.execute(
            "UPDATE checklists SET archived_at = COALESCE(archived_at, ?1), updated_at = ?1 \
             WHERE id = ?2",
            params![stamp, checklist_id.get()],
        )?;
        let checklist = load_checklist(&tx, checklist_id.get())?;
        tx.commit()?;
        Ok(checklist)
    }

    pub fn restore_checklist(
        &mut self,
        checklist_id: ChecklistId,
        owner: UserId,
    ) -> Result<Checklist, StoreError> {
        let tx = self.immediate_tx()?;
        authorize_checklist(&tx, checklist_id, owner)?;
        tx.execute(
            "UPDATE checklists SET archived_at = NULL, updated_at = ?1 WHERE id = ?2",
            params![encode_timestamp(now()), checklist_id.get()],
        )?;
        let checklist = load_checklist(&tx, checklist_id.get())?;
        tx.commit()?;
        Ok(checklist)
    }

    /// Delete a checklist and everything hanging off it, items first, in
    /// one transaction. No orphaned items can survive a partial failure.
    pub fn delete_checklist(
        &mut self,
        checklist_id: ChecklistId,
        owner: UserId,
    ) -> Result<(), StoreError> {
        let tx = self.immediate_tx()?;
        authorize_checklist(&tx, checklist_id, owner)?;
        tx.execute(
            "DELETE FROM checklist_items WHERE checklist_id = ?1",
            params![checklist_id.get()],
        )?;
        tx.execute(
            "DELETE FROM notifications WHERE checklist_id = ?1",
            params![checklist_id.get()],
        )?;
        tx.execute(
            "DELETE FROM checklists WHERE id = ?1",
            params![checklist_id.get()],
        )?;
        tx.commit()?;
        info!(checklist_id = checklist_id.get(), "checklist deleted");
        Ok(())
    }

    /// Reminder content for `owner`'s non-template, non-archived
    /// checklists whose work date falls in `[start, end)`.
    pub fn reminder_sources(
        &mut self,
        owner: UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ReminderSource>, StoreError> {
        let sql = format!(
            "SELECT {CHECKLIST_COLUMNS} FROM checklists \
             WHERE user_id = ?1 AND is_template = 0 AND archived_at IS NULL \
             AND work_date >= ?2 AND work_date < ?3 ORDER BY work_date, id"
        );
        let checklists = {
            let mut stmt = self.conn().prepare_cached(&sql)?;
            let mapped = stmt.query_map(
                params![
                    owner.get(),
                    encode_timestamp(start),
                    encode_timestamp(end)
                ],
                checklist_from_row,
            )?;
            mapped.collect::<Result<Vec<_>, _>>()?
        };

        let mut sources = Vec::with_capacity(checklists.len());
        for checklist in checklists {
            let mut stmt = self.conn().prepare_cached(
                "SELECT i.name, c.name, i.quantity, i.unit FROM checklist_items i \
                 JOIN categories c ON c.id = i.category_id \
                 WHERE i.checklist_id = ?1 ORDER BY i.id",
            )?;
            let mapped = stmt.query_map(params![checklist.id], |row| {
                Ok(ReminderItem {
                    name: row.get(0)?,
                    category_name: row.get(1)?,
                    quantity: row.get(2)?,
                    unit: row.get(3)?,
                })
            })?;
            let items = mapped.collect::<Result<Vec<_>, _>>()?;
            sources.push(ReminderSource { checklist, items });
        }
        Ok(sources)
    }

    /// Checklists the owner viewed since `since`, newest view first, with
    /// derived counts. Feeds the dashboard's "recent" rail.
    pub fn recently_viewed(
        &mut self,
        owner: UserId,
        since: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<ChecklistWithCounts>, StoreError> {
        let sql = format!(
            "SELECT c.id, c.name, c.description, c.site_name, c.work_date, c.is_template, \
             c.archived_at, c.status, c.user_id, c.created_at, c.updated_at, c.last_viewed_at, \
             COUNT(i.id) AS total_items, \
             COALESCE(SUM(CASE WHEN i.status = '{}' THEN 1 ELSE 0 END), 0) AS completed_items \
             FROM checklists c \
             LEFT JOIN checklist_items i ON i.checklist_id = c.id \
             WHERE c.user_id = ?1 AND c.archived_at IS NULL AND c.last_viewed_at >= ?2 \
             GROUP BY c.id ORDER BY c.last_viewed_at DESC LIMIT ?3",
            sitecheck_model::Status::Completed.as_str()
        );
        let mut stmt = self.conn().prepare_cached(&sql)?;
        let mapped = stmt.query_map(
            params![owner.get(), encode_timestamp(since), limit as i64],
            |row| {
                let checklist = checklist_from_row(row)?;
                let total_items: i64 = row.get(12)?;
                let completed_items: i64 = row.get(13)?;
                Ok(ChecklistWithCounts {
                    checklist,
                    summary: ChecklistSummary {
                        completed_items: completed_items.max(0) as u64,
                        total_items: total_items.max(0) as u64,
                    },
                })
            },
        )?;
        Ok(mapped.collect::<Result<Vec<_>, _>>()?)
    }
}

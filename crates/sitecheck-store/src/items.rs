// SPDX-License-Identifier: Apache-2.0

//! Item persistence and the transactional status updater.
//!
//! Every mutation recomputes the checklist aggregate from the complete
//! sibling set re-read inside the same transaction, then writes the
//! checklist row at most once. Incremental counter maintenance is
//! deliberately not used.

use crate::authorize::authorize_checklist;
use crate::error::StoreError;
use crate::row::{checklist_from_row, item_with_category_from_row, CHECKLIST_COLUMNS, ITEM_JOIN_COLUMNS};
use crate::store::Store;
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use sitecheck_core::time::{encode_timestamp, now};
use sitecheck_core::{CategoryId, ChecklistId, ItemId, UserId};
use sitecheck_model::{aggregate_status, Checklist, ChecklistSummary, ItemWithCategory, Status};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub memo: Option<String>,
    pub status: Option<Status>,
}

/// Result of a single-item mutation: the item with its category, the
/// checklist row as committed, and the derived counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStatusUpdate {
    pub item: ItemWithCategory,
    pub checklist: Checklist,
    pub summary: ChecklistSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchStatusUpdate {
    pub items: Vec<ItemWithCategory>,
    pub checklist: Checklist,
    pub summary: ChecklistSummary,
}

pub(crate) fn load_checklist(conn: &Connection, id: i64) -> Result<Checklist, StoreError> {
    let sql = format!("SELECT {CHECKLIST_COLUMNS} FROM checklists WHERE id = ?1");
    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.query_row(params![id], checklist_from_row)
        .optional()?
        .ok_or(StoreError::NotFoundOrUnauthorized)
}

pub(crate) fn load_item_with_category(
    conn: &Connection,
    item_id: i64,
) -> Result<ItemWithCategory, StoreError> {
    let sql = format!(
        "SELECT {ITEM_JOIN_COLUMNS} FROM checklist_items i \
         JOIN categories c ON c.id = i.category_id WHERE i.id = ?1"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.query_row(params![item_id], item_with_category_from_row)
        .optional()?
        .ok_or(StoreError::NotFoundOrUnauthorized)
}

pub(crate) fn items_for_checklist(
    conn: &Connection,
    checklist_id: i64,
) -> Result<Vec<ItemWithCategory>, StoreError> {
    let sql = format!(
        "SELECT {ITEM_JOIN_COLUMNS} FROM checklist_items i \
         JOIN categories c ON c.id = i.category_id WHERE i.checklist_id = ?1 ORDER BY i.id"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let mapped = stmt.query_map(params![checklist_id], item_with_category_from_row)?;
    Ok(mapped.collect::<Result<Vec<_>, _>>()?)
}

/// The complete sibling status set for one checklist, read inside the
/// caller's transaction.
pub(crate) fn sibling_statuses(
    conn: &Connection,
    checklist_id: i64,
) -> Result<Vec<Status>, StoreError> {
    let mut stmt =
        conn.prepare_cached("SELECT status FROM checklist_items WHERE checklist_id = ?1")?;
    let mapped = stmt.query_map(params![checklist_id], |row| {
        let raw: String = row.get(0)?;
        Status::parse(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
    })?;
    Ok(mapped.collect::<Result<Vec<_>, _>>()?)
}

pub(crate) fn summary_of(statuses: &[Status]) -> ChecklistSummary {
    ChecklistSummary {
        completed_items: statuses.iter().filter(|s| s.is_completed()).count() as u64,
        total_items: statuses.len() as u64,
    }
}

/// Recompute the aggregate from the full sibling set and persist it when
/// it differs from the stored value. At most one checklist write per
/// logical operation, even for batches. Runs on every item mutation,
/// including data-level no-ops, so out-of-band drift gets repaired.
pub(crate) fn reconcile_checklist_status(
    conn: &Connection,
    checklist: &Checklist,
) -> Result<(Checklist, ChecklistSummary), StoreError> {
    let statuses = sibling_statuses(conn, checklist.id)?;
    let aggregate = aggregate_status(&statuses);
    let summary = summary_of(&statuses);
    if aggregate == checklist.status {
        return Ok((checklist.clone(), summary));
    }
    conn.execute(
        "UPDATE checklists SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![aggregate.as_str(), encode_timestamp(now()), checklist.id],
    )?;
    debug!(
        checklist_id = checklist.id,
        from = %checklist.status,
        to = %aggregate,
        "checklist status reconciled"
    );
    Ok((load_checklist(conn, checklist.id)?, summary))
}

impl Store {
    pub fn list_items(
        &mut self,
        checklist_id: ChecklistId,
        owner: UserId,
    ) -> Result<Vec<ItemWithCategory>, StoreError> {
        authorize_checklist(self.conn(), checklist_id, owner)?;
        items_for_checklist(self.conn(), checklist_id.get())
    }

    pub fn create_item(
        &mut self,
        checklist_id: ChecklistId,
        owner: UserId,
        new: &NewItem,
    ) -> Result<ItemStatusUpdate, StoreError> {
        let stamp = now();
        let tx = self.immediate_tx()?;
        let checklist = authorize_checklist(&tx, checklist_id, owner)?;
        let category_known: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)",
            params![new.category_id.get()],
            |row| row.get(0),
        )?;
        if !category_known {
            return Err(StoreError::Constraint(format!(
                "category {} does not exist",
                new.category_id
            )));
        }
        let status = new.status.unwrap_or(Status::NotStarted);
        let completed_at = status.is_completed().then(|| encode_timestamp(stamp));
        tx.execute(
            "INSERT INTO checklist_items (checklist_id, category_id, name, description, quantity, \
             unit, memo, status, completed_at, user_id, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
            params![
                checklist_id.get(),
                new.category_id.get(),
                new.name,
                new.description,
                new.quantity,
                new.unit,
                new.memo,
                status.as_str(),
                completed_at,
                owner.get(),
                encode_timestamp(stamp),
            ],
        )?;
        let item_id = tx.last_insert_rowid();
        let (checklist, summary) = reconcile_checklist_status(&tx, &checklist)?;
        let item = load_item_with_category(&tx, item_id)?;
        tx.commit()?;
        Ok(ItemStatusUpdate {
            item,
            checklist,
            summary,
        })
    }

    /// Apply one item-status change and keep the stored checklist status
    /// equal to the aggregate of its items, atomically.
    pub fn update_item_status(
        &mut self,
        checklist_id: ChecklistId,
        item_id: ItemId,
        new_status: Status,
        requester: UserId,
    ) -> Result<ItemStatusUpdate, StoreError> {
        let stamp = now();
        let tx = self.immediate_tx()?;
        let checklist = authorize_checklist(&tx, checklist_id, requester)?;
        let belongs: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM checklist_items WHERE id = ?1 AND checklist_id = ?2)",
            params![item_id.get(), checklist_id.get()],
            |row| row.get(0),
        )?;
        if !belongs {
            return Err(StoreError::NotFoundOrUnauthorized);
        }
        let completed_at = new_status.is_completed().then(|| encode_timestamp(stamp));
        tx.execute(
            "UPDATE checklist_items SET status = ?1, completed_at = ?2, updated_at = ?3 WHERE id = ?4",
            params![
                new_status.as_str(),
                completed_at,
                encode_timestamp(stamp),
                item_id.get()
            ],
        )?;
        let (checklist, summary) = reconcile_checklist_status(&tx, &checklist)?;
        let item = load_item_with_category(&tx, item_id.get())?;
        tx.commit()?;
        Ok(ItemStatusUpdate {
            item,
            checklist,
            summary,
        })
    }

    /// Batch form of [`Store::update_item_status`]: one transaction, one
    /// item UPDATE over the owned id set, one aggregate-and-commit step.
    /// Ids that do not belong to the checklist and requester are skipped;
    /// an empty id set is a valid no-op that still reconciles.
    pub fn update_items_status(
        &mut self,
        checklist_id: ChecklistId,
        item_ids: &[i64],
        new_status: Status,
        requester: UserId,
    ) -> Result<BatchStatusUpdate, StoreError> {
        let stamp = now();
        let tx = self.immediate_tx()?;
        let checklist = authorize_checklist(&tx, checklist_id, requester)?;

        let owned_ids: Vec<i64> = if item_ids.is_empty() {
            Vec::new()
        } else {
            let placeholders = vec!["?"; item_ids.len()].join(", ");
            let sql = format!(
                "SELECT id FROM checklist_items \
                 WHERE checklist_id = ? AND user_id = ? AND id IN ({placeholders}) ORDER BY id"
            );
            let mut select_params: Vec<Value> =
                vec![Value::Integer(checklist_id.get()), Value::Integer(requester.get())];
            select_params.extend(item_ids.iter().map(|id| Value::Integer(*id)));
            let mut stmt = tx.prepare(&sql)?;
            let mapped = stmt.query_map(params_from_iter(select_params.iter()), |row| row.get(0))?;
            mapped.collect::<Result<Vec<_>, _>>()?
        };

        if !owned_ids.is_empty() {
            let placeholders = vec!["?"; owned_ids.len()].join(", ");
            let sql = format!(
                "UPDATE checklist_items SET status = ?, completed_at = ?, updated_at = ? \
                 WHERE id IN ({placeholders})"
            );
            let completed_at = new_status.is_completed().then(|| encode_timestamp(stamp));
            let mut update_params: Vec<Value> = vec![
                Value::Text(new_status.as_str().to_string()),
                completed_at.map_or(Value::Null, Value::Text),
                Value::Text(encode_timestamp(stamp)),
            ];
            update_params.extend(owned_ids.iter().map(|id| Value::Integer(*id)));
            tx.execute(&sql, params_from_iter(update_params.iter()))?;
        }

        let (checklist, summary) = reconcile_checklist_status(&tx, &checklist)?;
        let items = owned_ids
            .iter()
            .map(|id| load_item_with_category(&tx, *id))
            .collect::<Result<Vec<_>, _>>()?;
        tx.commit()?;
        Ok(BatchStatusUpdate {
            items,
            checklist,
            summary,
        })
    }
}

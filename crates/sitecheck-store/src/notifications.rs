// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::row::{notification_from_row, NOTIFICATION_COLUMNS};
use crate::store::Store;
use rusqlite::params;
use sitecheck_core::time::{encode_timestamp, now};
use sitecheck_core::UserId;
use sitecheck_model::{Notification, ReminderPayload};

impl Store {
    /// Persist one generated reminder. The generator does not deduplicate
    /// across invocations; every call appends a fresh row.
    pub fn insert_notification(
        &mut self,
        owner: UserId,
        checklist_id: i64,
        kind: &str,
        title: &str,
        payload: &ReminderPayload,
    ) -> Result<Notification, StoreError> {
        let message = serde_json::to_string(payload)
            .map_err(|e| StoreError::Constraint(format!("unserializable payload: {e}")))?;
        self.conn().execute(
            "INSERT INTO notifications (user_id, checklist_id, kind, title, message, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                owner.get(),
                checklist_id,
                kind,
                title,
                message,
                encode_timestamp(now())
            ],
        )?;
        let id = self.conn().last_insert_rowid();
        let sql = format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = ?1");
        let mut stmt = self.conn().prepare_cached(&sql)?;
        Ok(stmt.query_row(params![id], notification_from_row)?)
    }

    /// The owner's notifications, newest first.
    pub fn list_notifications(&mut self, owner: UserId) -> Result<Vec<Notification>, StoreError> {
        let sql = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications \
             WHERE user_id = ?1 ORDER BY created_at DESC, id DESC"
        );
        let mut stmt = self.conn().prepare_cached(&sql)?;
        let mapped = stmt.query_map(params![owner.get()], notification_from_row)?;
        Ok(mapped.collect::<Result<Vec<_>, _>>()?)
    }
}

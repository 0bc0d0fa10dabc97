// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::row::{checklist_from_row, CHECKLIST_COLUMNS};
use rusqlite::{params, Connection, OptionalExtension};
use sitecheck_core::{ChecklistId, UserId};
use sitecheck_model::Checklist;

/// The single ownership gate in front of every checklist read or write.
///
/// Ownership is a visibility boundary: a checklist that exists but
/// belongs to someone else yields the same `NotFoundOrUnauthorized` as an
/// id that was never allocated, so responses cannot leak existence.
pub(crate) fn authorize_checklist(
    conn: &Connection,
    checklist_id: ChecklistId,
    owner: UserId,
) -> Result<Checklist, StoreError> {
    let sql = format!("SELECT {CHECKLIST_COLUMNS} FROM checklists WHERE id = ?1 AND user_id = ?2");
    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.query_row(params![checklist_id.get(), owner.get()], |row| {
        checklist_from_row(row)
    })
    .optional()?
    .ok_or(StoreError::NotFoundOrUnauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use crate::users::tests_support::insert_user;
    use chrono::Utc;
    use rusqlite::params;
    use sitecheck_core::time::encode_timestamp;

    fn seed_checklist(store: &Store, owner: i64) -> i64 {
        let now = encode_timestamp(Utc::now());
        store
            .conn()
            .execute(
                "INSERT INTO checklists (name, description, site_name, work_date, is_template, \
                 status, user_id, created_at, updated_at, name_search, site_search) \
                 VALUES ('Footings', NULL, 'North Yard', ?1, 0, 'NotStarted', ?2, ?1, ?1, 'footings', 'north yard')",
                params![now, owner],
            )
            .expect("insert checklist");
        store.conn().last_insert_rowid()
    }

    #[test]
    fn owner_mismatch_and_missing_row_are_indistinguishable() {
        let store = Store::open_in_memory().expect("open store");
        let alice = insert_user(&store, "sub-alice", "Alice");
        let mallory = insert_user(&store, "sub-mallory", "Mallory");
        let checklist = seed_checklist(&store, alice);

        let foreign = authorize_checklist(
            store.conn(),
            ChecklistId::new(checklist).expect("id"),
            UserId::new(mallory).expect("id"),
        )
        .expect_err("foreign checklist must be hidden");
        let missing = authorize_checklist(
            store.conn(),
            ChecklistId::new(checklist + 999).expect("id"),
            UserId::new(alice).expect("id"),
        )
        .expect_err("missing checklist must be hidden");

        assert_eq!(foreign.to_string(), missing.to_string());
        assert!(matches!(foreign, StoreError::NotFoundOrUnauthorized));
        assert!(matches!(missing, StoreError::NotFoundOrUnauthorized));

        let owned = authorize_checklist(
            store.conn(),
            ChecklistId::new(checklist).expect("id"),
            UserId::new(alice).expect("id"),
        )
        .expect("owner sees the checklist");
        assert_eq!(owned.id, checklist);
    }
}

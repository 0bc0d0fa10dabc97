// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::row::{user_from_row, USER_COLUMNS};
use crate::store::Store;
use rusqlite::params;
use sitecheck_core::time::{encode_timestamp, now};
use sitecheck_model::{User, DEFAULT_USER_ROLE};

impl Store {
    /// Map an external identity to the internal user row, creating it on
    /// first use. Existing users get their display name refreshed. The
    /// UNIQUE constraint on `subject` makes concurrent first writes
    /// converge on a single row; whichever insert lands first wins.
    pub fn upsert_user(&mut self, subject: &str, name: &str) -> Result<User, StoreError> {
        let stamp = encode_timestamp(now());
        self.conn().execute(
            "INSERT INTO users (subject, name, role, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?4) \
             ON CONFLICT(subject) DO UPDATE SET name = excluded.name, updated_at = excluded.updated_at",
            params![subject, name, DEFAULT_USER_ROLE, stamp],
        )?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE subject = ?1");
        let mut stmt = self.conn().prepare_cached(&sql)?;
        Ok(stmt.query_row(params![subject], user_from_row)?)
    }
}

// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::{migrations, seed};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use tracing::info;

/// Explicitly constructed persistence handle. One `Store` owns one SQLite
/// connection; callers that need cross-request sharing wrap it themselves
/// (the server keeps it behind an async mutex in its state).
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "checklist store open");
        Self::bootstrap(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(mut conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON; PRAGMA busy_timeout=5000;",
        )?;
        let _ = conn.set_prepared_statement_cache_capacity(128);
        let version = migrations::migrate(&mut conn)?;
        seed::ensure_default_categories(&conn)?;
        info!(schema_version = version, "checklist store ready");
        Ok(Self { conn })
    }

    /// Read access for the query layer and for tests. Writes go through
    /// the store's own methods so they stay transactional.
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// One write transaction per logical operation. `IMMEDIATE` takes the
    /// write lock up front, so the sibling re-read inside the transaction
    /// sees exactly the state the commit will publish.
    pub(crate) fn immediate_tx(&mut self) -> Result<Transaction<'_>, StoreError> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}

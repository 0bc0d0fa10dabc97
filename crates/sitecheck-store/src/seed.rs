// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use chrono::Utc;
use rusqlite::{params, Connection};
use sitecheck_core::time::encode_timestamp;

const DEFAULT_CATEGORIES: [(&str, &str, i64); 5] = [
    ("Safety", "Site safety checks before and during work", 1),
    ("Materials", "Consumables and stock to bring on site", 2),
    ("Equipment", "Tools and machinery", 3),
    ("Inspection", "Sign-offs and quality checks", 4),
    ("Cleanup", "End-of-day teardown and waste handling", 5),
];

/// Insert the default category set if it is not there yet. Categories are
/// read-only to the rest of this service, so seeding at startup is the
/// only writer.
pub(crate) fn ensure_default_categories(conn: &Connection) -> Result<(), StoreError> {
    let now = encode_timestamp(Utc::now());
    for (name, description, display_order) in DEFAULT_CATEGORIES {
        conn.execute(
            "INSERT OR IGNORE INTO categories (name, description, display_order, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![name, description, display_order, now],
        )?;
    }
    Ok(())
}

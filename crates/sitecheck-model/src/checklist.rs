// SPDX-License-Identifier: Apache-2.0

use crate::status::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named collection of items tied to a site and a work date.
///
/// `status` is derived from the item set but stored redundantly for query
/// efficiency; the store keeps it equal to the aggregate after every item
/// mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub site_name: String,
    pub work_date: DateTime<Utc>,
    pub is_template: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub status: Status,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_viewed_at: Option<DateTime<Utc>>,
}

/// Completed/total item counts, computed from the item set at read time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSummary {
    pub completed_items: u64,
    pub total_items: u64,
}

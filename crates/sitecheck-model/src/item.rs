// SPDX-License-Identifier: Apache-2.0

use crate::category::Category;
use crate::status::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single trackable unit of a checklist.
///
/// Invariant: `completed_at` is non-null iff `status == Completed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub checklist_id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub memo: Option<String>,
    pub status: Status,
    pub completed_at: Option<DateTime<Utc>>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemWithCategory {
    #[serde(flatten)]
    pub item: Item,
    pub category: Category,
}

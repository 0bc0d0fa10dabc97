// SPDX-License-Identifier: Apache-2.0

use rusqlite::{params_from_iter, Connection};
use serde::{Deserialize, Serialize};
use sitecheck_model::{Checklist, ChecklistSummary};
use std::fmt::{Display, Formatter};

use crate::db::build_sql;
use crate::filters::ChecklistQueryRequest;
use crate::row_decode::checklist_with_counts_from_row;

#[derive(Debug)]
pub struct QueryError(pub String);

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for QueryError {}

/// One listing row: the checklist plus its derived item counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistWithCounts {
    #[serde(flatten)]
    pub checklist: Checklist,
    #[serde(flatten)]
    pub summary: ChecklistSummary,
}

/// Run a sanitized listing request for one owner.
pub fn query_checklists(
    conn: &Connection,
    owner_id: i64,
    req: &ChecklistQueryRequest,
) -> Result<Vec<ChecklistWithCounts>, QueryError> {
    let (sql, params) = build_sql(owner_id, req);
    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| QueryError(e.to_string()))?;
    let mapped = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            checklist_with_counts_from_row(row)
        })
        .map_err(|e| QueryError(e.to_string()))?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| QueryError(e.to_string()))
}

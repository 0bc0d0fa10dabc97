// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sitecheck_model::Status;
use unicode_normalization::UnicodeNormalization;

pub const SORT_FIELDS: [&str; 3] = ["createdAt", "updatedAt", "workDate"];
pub const DEFAULT_LIMIT: usize = 100;
pub const MAX_LIMIT: usize = 500;

/// Sortable checklist columns. Anything outside this set coming from a
/// client is replaced by the default rather than interpolated into SQL.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    WorkDate,
}

impl SortField {
    /// Parse a raw `sortBy` value; unrecognized input silently falls back
    /// to `createdAt` (field-injection defense, not a validation error).
    #[must_use]
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw {
            Some("createdAt") => Self::CreatedAt,
            Some("updatedAt") => Self::UpdatedAt,
            Some("workDate") => Self::WorkDate,
            _ => Self::default(),
        }
    }

    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::WorkDate => "work_date",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => Self::Asc,
            _ => Self::default(),
        }
    }

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Composable listing filters. All optional; everything is AND-combined
/// except the text search, which ORs the name and site-name columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChecklistFilter {
    /// `false` (the default) lists active checklists; `true` lists
    /// archived ones. The archived axis always narrows the result.
    pub is_archived: bool,
    /// Exact match when present; no constraint when absent.
    pub is_template: Option<bool>,
    pub status: Option<Status>,
    /// Case-insensitive substring over name OR site name.
    pub search: Option<String>,
    /// Inclusive start of the work-date range.
    pub date_from: Option<NaiveDate>,
    /// Inclusive end of the work-date range; normalized to
    /// start-of-next-day exclusive so the whole end date is covered.
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistQueryRequest {
    pub filter: ChecklistFilter,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub limit: usize,
}

impl Default for ChecklistQueryRequest {
    fn default() -> Self {
        Self {
            filter: ChecklistFilter::default(),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Escape LIKE wildcards so user input only ever matches literally.
#[must_use]
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '!' | '%' | '_' => {
                out.push('!');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Canonical search normalization policy: NFKC + Unicode lowercase.
/// Applied both when maintaining the `*_search` columns and when matching
/// against them, so comparisons stay consistent.
#[must_use]
pub fn normalize_search(input: &str) -> String {
    input.nfkc().collect::<String>().to_lowercase()
}

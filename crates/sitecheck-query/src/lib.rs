#![forbid(unsafe_code)]

pub const CRATE_NAME: &str = "sitecheck-query";

mod db;
mod executor;
mod filters;
mod row_decode;

pub use db::build_sql;
pub use executor::{query_checklists, ChecklistWithCounts, QueryError};
pub use filters::{
    escape_like, normalize_search, ChecklistFilter, ChecklistQueryRequest, SortField, SortOrder,
    DEFAULT_LIMIT, MAX_LIMIT, SORT_FIELDS,
};

#[cfg(test)]
mod query_tests;

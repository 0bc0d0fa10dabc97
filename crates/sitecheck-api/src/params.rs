// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use sitecheck_core::time::parse_calendar_date;
use sitecheck_model::Status;
use sitecheck_query::{
    ChecklistFilter, ChecklistQueryRequest, SortField, SortOrder, DEFAULT_LIMIT, MAX_LIMIT,
};
use std::collections::HashMap;

fn parse_bool_param(query: &HashMap<String, String>, name: &str) -> Result<Option<bool>, ApiError> {
    let Some(raw) = query.get(name) else {
        return Ok(None);
    };
    if raw == "1" || raw.eq_ignore_ascii_case("true") {
        Ok(Some(true))
    } else if raw == "0" || raw.eq_ignore_ascii_case("false") {
        Ok(Some(false))
    } else {
        Err(ApiError::invalid_param(name, raw))
    }
}

/// Turn the untrusted listing query string into a bounded request.
///
/// `sortBy`/`sortOrder` degrade silently to their defaults; `status` and
/// the calendar dates are validated and rejected with the offending field
/// named. Nothing from the raw map ever reaches SQL directly.
pub fn parse_list_checklists_params(
    query: &HashMap<String, String>,
) -> Result<ChecklistQueryRequest, ApiError> {
    parse_list_checklists_params_with_limit(query, DEFAULT_LIMIT, MAX_LIMIT)
}

pub fn parse_list_checklists_params_with_limit(
    query: &HashMap<String, String>,
    default_limit: usize,
    max_limit: usize,
) -> Result<ChecklistQueryRequest, ApiError> {
    let is_archived = parse_bool_param(query, "isArchived")?.unwrap_or(false);
    let is_template = parse_bool_param(query, "isTemplate")?;

    let status = query
        .get("status")
        .map(|raw| Status::parse(raw).map_err(|_| ApiError::invalid_param("status", raw)))
        .transpose()?;

    let search = query
        .get("searchQuery")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let date_from = query
        .get("dateFrom")
        .map(|raw| {
            parse_calendar_date("dateFrom", raw).map_err(|_| ApiError::invalid_param("dateFrom", raw))
        })
        .transpose()?;
    let date_to = query
        .get("dateTo")
        .map(|raw| {
            parse_calendar_date("dateTo", raw).map_err(|_| ApiError::invalid_param("dateTo", raw))
        })
        .transpose()?;

    let limit = if let Some(raw) = query.get("limit") {
        let value = raw
            .parse::<usize>()
            .map_err(|_| ApiError::invalid_param("limit", raw))?;
        if value == 0 || value > max_limit {
            return Err(ApiError::invalid_param("limit", raw));
        }
        value
    } else {
        default_limit
    };

    Ok(ChecklistQueryRequest {
        filter: ChecklistFilter {
            is_archived,
            is_template,
            status,
            search,
            date_from,
            date_to,
        },
        sort_by: SortField::parse_or_default(query.get("sortBy").map(String::as_str)),
        sort_order: SortOrder::parse_or_default(query.get("sortOrder").map(String::as_str)),
        limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn q(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_query_yields_defaults() {
        let req = parse_list_checklists_params(&q(&[])).expect("defaults");
        assert_eq!(req, ChecklistQueryRequest::default());
    }

    #[test]
    fn full_query_parses_every_filter() {
        let req = parse_list_checklists_params(&q(&[
            ("isArchived", "true"),
            ("isTemplate", "false"),
            ("status", "Pending"),
            ("searchQuery", "  yard  "),
            ("dateFrom", "2025-01-01"),
            ("dateTo", "2025-01-09"),
            ("sortBy", "workDate"),
            ("sortOrder", "asc"),
            ("limit", "25"),
        ]))
        .expect("parse");
        assert!(req.filter.is_archived);
        assert_eq!(req.filter.is_template, Some(false));
        assert_eq!(req.filter.status, Some(Status::Pending));
        assert_eq!(req.filter.search.as_deref(), Some("yard"));
        assert_eq!(
            req.filter.date_from,
            Some(NaiveDate::from_ymd_opt(2025, 1, 1).expect("ymd"))
        );
        assert_eq!(
            req.filter.date_to,
            Some(NaiveDate::from_ymd_opt(2025, 1, 9).expect("ymd"))
        );
        assert_eq!(req.sort_by, SortField::WorkDate);
        assert_eq!(req.sort_order, SortOrder::Asc);
        assert_eq!(req.limit, 25);
    }

    #[test]
    fn unknown_sort_values_degrade_silently() {
        let req = parse_list_checklists_params(&q(&[
            ("sortBy", "maliciousField"),
            ("sortOrder", "sideways"),
        ]))
        .expect("parse");
        assert_eq!(req.sort_by, SortField::CreatedAt);
        assert_eq!(req.sort_order, SortOrder::Desc);
    }

    #[test]
    fn invalid_status_is_rejected_not_coerced() {
        let err = parse_list_checklists_params(&q(&[("status", "Done")])).expect_err("reject");
        assert_eq!(err.code, crate::ApiErrorCode::InvalidQueryParameter);
        assert!(err.message.contains("status"));
    }

    #[test]
    fn invalid_dates_and_bools_name_the_field() {
        let err =
            parse_list_checklists_params(&q(&[("dateTo", "01/09/2025")])).expect_err("reject");
        assert!(err.message.contains("dateTo"));
        let err =
            parse_list_checklists_params(&q(&[("isArchived", "maybe")])).expect_err("reject");
        assert!(err.message.contains("isArchived"));
    }

    #[test]
    fn limit_is_bounded() {
        assert!(parse_list_checklists_params(&q(&[("limit", "0")])).is_err());
        assert!(parse_list_checklists_params(&q(&[("limit", "100000")])).is_err());
        assert!(parse_list_checklists_params(&q(&[("limit", "abc")])).is_err());
    }

    #[test]
    fn empty_search_is_ignored() {
        let req = parse_list_checklists_params(&q(&[("searchQuery", "   ")])).expect("parse");
        assert_eq!(req.filter.search, None);
    }
}

// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Closed set of wire-level error codes, serialized verbatim into the
/// `{"error": {...}}` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorCode {
    ValidationFailed,
    InvalidQueryParameter,
    Unauthenticated,
    NotFound,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ValidationFailed | Self::InvalidQueryParameter => 400,
            Self::Unauthenticated => 401,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter: {name}"),
            json!({"field_errors": [{"parameter": name, "reason": "invalid", "value": value}]}),
        )
    }

    #[must_use]
    pub fn validation_failed(field: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            format!("validation failed: {field}"),
            json!({"field_errors": [{"field": field, "reason": reason.into()}]}),
        )
    }

    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::new(
            ApiErrorCode::Unauthenticated,
            "authentication required",
            json!({}),
        )
    }

    /// Missing and not-owned are the same outcome on the wire; the body
    /// never says which.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(ApiErrorCode::NotFound, "checklist or item not found", json!({}))
    }

    /// Internal failures withhold detail; the specifics go to the log,
    /// not the response body.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(ApiErrorCode::Internal, "internal error", json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_is_exhaustive_and_stable() {
        assert_eq!(ApiErrorCode::ValidationFailed.http_status(), 400);
        assert_eq!(ApiErrorCode::InvalidQueryParameter.http_status(), 400);
        assert_eq!(ApiErrorCode::Unauthenticated.http_status(), 401);
        assert_eq!(ApiErrorCode::NotFound.http_status(), 404);
        assert_eq!(ApiErrorCode::Internal.http_status(), 500);
    }

    #[test]
    fn codes_serialize_as_pascal_case_strings() {
        let err = ApiError::invalid_param("status", "Done");
        let value = serde_json::to_value(&err).expect("serialize error");
        assert_eq!(value["code"], "InvalidQueryParameter");
        assert_eq!(value["details"]["field_errors"][0]["parameter"], "status");
    }

    #[test]
    fn internal_error_withholds_detail() {
        let value = serde_json::to_value(ApiError::internal()).expect("serialize");
        assert_eq!(value["message"], "internal error");
        assert_eq!(value["details"], serde_json::json!({}));
    }
}

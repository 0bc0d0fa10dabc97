// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// The target row does not exist or belongs to someone else. The two
    /// cases are deliberately indistinguishable so callers cannot probe
    /// for the existence of other users' data.
    NotFoundOrUnauthorized,
    Constraint(String),
    Persistence(rusqlite::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFoundOrUnauthorized => f.write_str("checklist or item not found"),
            Self::Constraint(msg) => write!(f, "constraint violation: {msg}"),
            Self::Persistence(err) => write!(f, "persistence failure: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::NotFoundOrUnauthorized | Self::Constraint(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(message.clone().unwrap_or_else(|| failure.to_string()))
            }
            _ => Self::Persistence(err),
        }
    }
}

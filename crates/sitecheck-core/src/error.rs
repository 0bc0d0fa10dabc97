// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    InvalidIdentifier { kind: &'static str, value: String },
    InvalidDate { field: &'static str, value: String },
    InvalidTimestamp { field: &'static str, value: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier { kind, value } => {
                write!(f, "invalid {kind} `{value}`: must be a positive integer")
            }
            Self::InvalidDate { field, value } => {
                write!(f, "invalid {field} `{value}`: expected YYYY-MM-DD")
            }
            Self::InvalidTimestamp { field, value } => {
                write!(f, "invalid {field} `{value}`: expected an RFC 3339 timestamp")
            }
        }
    }
}

impl std::error::Error for Error {}

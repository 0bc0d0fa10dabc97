// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const STATUS_VALUES: [&str; 3] = ["NotStarted", "Pending", "Completed"];

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    UnknownStatus(String),
    Empty(&'static str),
    TooLong(&'static str, usize),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStatus(value) => write!(
                f,
                "unknown status `{value}`; expected one of NotStarted, Pending, Completed"
            ),
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Lifecycle state shared by checklists and their items.
///
/// One closed type across the whole service; nothing outside this set is
/// representable past the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Status {
    NotStarted,
    Pending,
    Completed,
}

impl Status {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "NotStarted" => Ok(Self::NotStarted),
            "Pending" => Ok(Self::Pending),
            "Completed" => Ok(Self::Completed),
            other => Err(ParseError::UnknownStatus(other.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive a checklist's status from the complete set of its items'
/// statuses.
///
/// The rule is order-independent and must always be evaluated over the
/// full sibling set, never incrementally: empty → `NotStarted`, all
/// completed → `Completed`, none completed → `NotStarted`, otherwise
/// `Pending`.
#[must_use]
pub fn aggregate_status(statuses: &[Status]) -> Status {
    if statuses.is_empty() {
        return Status::NotStarted;
    }
    let completed = statuses.iter().filter(|s| s.is_completed()).count();
    if completed == statuses.len() {
        Status::Completed
    } else if completed == 0 {
        Status::NotStarted
    } else {
        Status::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_member() {
        for raw in STATUS_VALUES {
            let status = Status::parse(raw).expect("member parses");
            assert_eq!(status.as_str(), raw);
        }
    }

    #[test]
    fn parse_rejects_anything_outside_the_enum() {
        for raw in ["", "completed", "COMPLETED", "InProgress", "Done", "2"] {
            assert!(Status::parse(raw).is_err(), "{raw:?} must be rejected");
        }
    }

    #[test]
    fn empty_set_is_not_started() {
        assert_eq!(aggregate_status(&[]), Status::NotStarted);
    }

    #[test]
    fn all_completed_is_completed() {
        assert_eq!(
            aggregate_status(&[Status::Completed, Status::Completed]),
            Status::Completed
        );
    }

    #[test]
    fn none_completed_is_not_started() {
        assert_eq!(
            aggregate_status(&[Status::NotStarted, Status::Pending, Status::NotStarted]),
            Status::NotStarted
        );
    }

    #[test]
    fn mixed_is_pending() {
        assert_eq!(
            aggregate_status(&[Status::NotStarted, Status::Completed]),
            Status::Pending
        );
        assert_eq!(
            aggregate_status(&[Status::Completed, Status::Pending, Status::Completed]),
            Status::Pending
        );
    }

    #[test]
    fn aggregation_is_order_independent_and_idempotent() {
        let mut statuses = vec![
            Status::Completed,
            Status::NotStarted,
            Status::Pending,
            Status::Completed,
        ];
        let forward = aggregate_status(&statuses);
        statuses.reverse();
        assert_eq!(aggregate_status(&statuses), forward);
        assert_eq!(aggregate_status(&statuses), forward);
    }

    #[test]
    fn exhaustive_small_multisets_match_the_rule() {
        let all = [Status::NotStarted, Status::Pending, Status::Completed];
        for a in all {
            for b in all {
                for c in all {
                    let set = [a, b, c];
                    let completed = set.iter().filter(|s| s.is_completed()).count();
                    let expected = match completed {
                        3 => Status::Completed,
                        0 => Status::NotStarted,
                        _ => Status::Pending,
                    };
                    assert_eq!(aggregate_status(&set), expected);
                }
            }
        }
    }
}

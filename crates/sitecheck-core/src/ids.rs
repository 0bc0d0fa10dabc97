// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ChecklistId(i64);

impl ChecklistId {
    pub fn new(raw: i64) -> Result<Self, Error> {
        if raw <= 0 {
            return Err(Error::InvalidIdentifier {
                kind: "checklist id",
                value: raw.to_string(),
            });
        }
        Ok(Self(raw))
    }

    pub fn parse(input: &str) -> Result<Self, Error> {
        let raw = input.parse::<i64>().map_err(|_| Error::InvalidIdentifier {
            kind: "checklist id",
            value: input.to_string(),
        })?;
        Self::new(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for ChecklistId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    pub fn new(raw: i64) -> Result<Self, Error> {
        if raw <= 0 {
            return Err(Error::InvalidIdentifier {
                kind: "item id",
                value: raw.to_string(),
            });
        }
        Ok(Self(raw))
    }

    pub fn parse(input: &str) -> Result<Self, Error> {
        let raw = input.parse::<i64>().map_err(|_| Error::InvalidIdentifier {
            kind: "item id",
            value: input.to_string(),
        })?;
        Self::new(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategoryId(i64);

impl CategoryId {
    pub fn new(raw: i64) -> Result<Self, Error> {
        if raw <= 0 {
            return Err(Error::InvalidIdentifier {
                kind: "category id",
                value: raw.to_string(),
            });
        }
        Ok(Self(raw))
    }

    pub fn parse(input: &str) -> Result<Self, Error> {
        let raw = input.parse::<i64>().map_err(|_| Error::InvalidIdentifier {
            kind: "category id",
            value: input.to_string(),
        })?;
        Self::new(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(raw: i64) -> Result<Self, Error> {
        if raw <= 0 {
            return Err(Error::InvalidIdentifier {
                kind: "user id",
                value: raw.to_string(),
            });
        }
        Ok(Self(raw))
    }

    pub fn parse(input: &str) -> Result<Self, Error> {
        let raw = input.parse::<i64>().map_err(|_| Error::InvalidIdentifier {
            kind: "user id",
            value: input.to_string(),
        })?;
        Self::new(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

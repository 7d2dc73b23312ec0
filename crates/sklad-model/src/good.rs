// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Matches the `VARCHAR(100)` declared for `shops_goods.location`.
pub const LOCATION_MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Negative(&'static str, i64),
    TooLong(&'static str, usize),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Negative(name, value) => {
                write!(f, "{name} must not be negative, got {value}")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Identity of one catalog product. The store keys the `goods` table by
/// this value; re-submission under the same id replaces the whole row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct GoodId(i64);

impl GoodId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl Display for GoodId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the `goods` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoodRecord {
    pub id: GoodId,
    pub name: String,
    pub package_height: f64,
    pub package_width: f64,
}

/// One row of the `shops_goods` table. The natural key is the composite
/// (`good_id`, `location`); the storage row id is synthetic and never
/// meaningful input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationStock {
    pub good_id: GoodId,
    pub location: String,
    pub amount: i64,
}

/// Inventory of a good at one named location, before the owning good id
/// is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StockEntry {
    pub location: String,
    pub amount: i64,
}

impl StockEntry {
    /// Validating constructor: stock quantities are non-negative and a
    /// location name must be present and fit the declared column.
    pub fn new(location: impl Into<String>, amount: i64) -> Result<Self, ParseError> {
        let location = location.into();
        if location.is_empty() {
            return Err(ParseError::Empty("location"));
        }
        if location.len() > LOCATION_MAX_LEN {
            return Err(ParseError::TooLong("location", LOCATION_MAX_LEN));
        }
        if amount < 0 {
            return Err(ParseError::Negative("amount", amount));
        }
        Ok(Self { location, amount })
    }
}

/// Flat projection of a validated catalog document: `height` and `width`
/// lifted out of `package_params`, locations in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizedGood {
    pub id: GoodId,
    pub name: String,
    pub height: f64,
    pub width: f64,
    pub locations: Vec<StockEntry>,
}

impl NormalizedGood {
    #[must_use]
    pub fn good_record(&self) -> GoodRecord {
        GoodRecord {
            id: self.id,
            name: self.name.clone(),
            package_height: self.height,
            package_width: self.width,
        }
    }

    #[must_use]
    pub fn location_stock(&self) -> Vec<LocationStock> {
        self.locations
            .iter()
            .map(|entry| LocationStock {
                good_id: self.id,
                location: entry.location.clone(),
                amount: entry.amount,
            })
            .collect()
    }
}

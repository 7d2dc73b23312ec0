// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod document;
mod good;

pub const CRATE_NAME: &str = "sklad-model";

pub use document::{CatalogDocument, LocationAmount, PackageParams};
pub use good::{
    GoodId, GoodRecord, LocationStock, NormalizedGood, ParseError, StockEntry, LOCATION_MAX_LEN,
};

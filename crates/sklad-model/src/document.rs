// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::good::GoodId;

/// The externally supplied nested catalog document. Deserialized only
/// after the schema gate has passed; fields are copied as-is downstream.
///
/// Unknown top-level keys are rejected here as well, matching the
/// `additionalProperties: false` scope of the document schema. Nested
/// objects stay open because the schema leaves them open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    pub id: GoodId,
    pub name: String,
    pub package_params: PackageParams,
    pub location_and_quantity: Vec<LocationAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageParams {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAmount {
    pub location: String,
    pub amount: i64,
}

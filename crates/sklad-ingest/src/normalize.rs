// SPDX-License-Identifier: Apache-2.0

use sklad_model::{CatalogDocument, NormalizedGood, ParseError, StockEntry};

/// Projects a validated catalog document into the flat shapes the two
/// tables need: `height`/`width` lifted out of `package_params`,
/// locations kept in input order. Fields are copied without type
/// coercion; the schema gate must already have run. Stock entries go
/// through the model's validating constructor, so a quantity the schema
/// cannot reject (a negative amount, an empty location) fails here.
pub fn normalize(document: &CatalogDocument) -> Result<NormalizedGood, ParseError> {
    let locations = document
        .location_and_quantity
        .iter()
        .map(|entry| StockEntry::new(entry.location.as_str(), entry.amount))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(NormalizedGood {
        id: document.id,
        name: document.name.clone(),
        height: document.package_params.height,
        width: document.package_params.width,
        locations,
    })
}

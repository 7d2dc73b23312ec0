// SPDX-License-Identifier: Apache-2.0

//! One-shot synchronization of a single catalog document into the
//! two-table SQLite store: decode, schema gate, normalization, upsert.
//! Strictly linear, one exclusive storage session per run.

#![forbid(unsafe_code)]

mod decode;
mod logging;
mod normalize;
mod store;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use serde_json::Value;
use sklad_model::{CatalogDocument, GoodId};
use sklad_schema::{SchemaNode, Violation};

pub const CRATE_NAME: &str = "sklad-ingest";

pub use decode::read_json_file;
pub use logging::{SyncEvent, SyncLog, SyncStage};
pub use normalize::normalize;
pub use store::{Store, StoreError, UpsertOutcome};

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SyncError {
    /// Document or schema file is not readable/parseable JSON.
    MalformedInput(String),
    /// The schema description itself could not be decoded.
    Schema(String),
    /// The document does not conform to the schema; no writes happened.
    Validation(Violation),
    /// Post-validation conversion into the typed model failed: wrong
    /// shape, or a value outside the model's domain such as a negative
    /// stock amount.
    Model(String),
    /// Table creation or upsert failed; the transaction rolled back.
    Storage(StoreError),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedInput(msg) => write!(f, "malformed input: {msg}"),
            Self::Schema(msg) => write!(f, "schema description error: {msg}"),
            Self::Validation(violation) => {
                write!(f, "document failed validation at {violation}")
            }
            Self::Model(msg) => write!(f, "document conversion error: {msg}"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl std::error::Error for SyncError {}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub document_path: PathBuf,
    pub schema_path: PathBuf,
    pub db_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SyncReport {
    pub good_id: GoodId,
    pub locations_written: usize,
    pub events: Vec<SyncEvent>,
}

/// Runs the whole pipeline for one document: load schema and document,
/// validate, normalize, upsert. The store is opened only after the
/// validation gate, so an invalid document performs zero storage writes
/// and never even creates the database file.
pub fn sync_catalog(opts: &SyncOptions) -> Result<SyncReport, SyncError> {
    let mut log = SyncLog::default();
    log.emit(SyncStage::Prepare, "sync.start", BTreeMap::new());

    let schema_value = read_json_file(&opts.schema_path)?;
    let schema = SchemaNode::from_value(&schema_value).map_err(|e| SyncError::Schema(e.0))?;
    let document = read_json_file(&opts.document_path)?;
    log.emit(SyncStage::Decode, "sync.decode.complete", BTreeMap::new());

    let record = gate_and_normalize(&schema, document, &mut log)?;

    let mut store = Store::open(&opts.db_path).map_err(SyncError::Storage)?;
    let outcome = store
        .upsert_good_with_stock(&record)
        .map_err(SyncError::Storage)?;
    log.emit(
        SyncStage::Persist,
        "sync.persist.complete",
        BTreeMap::from([(
            "locations_written".to_string(),
            outcome.locations_written.to_string(),
        )]),
    );
    log.emit(SyncStage::Finalize, "sync.committed", BTreeMap::new());

    Ok(SyncReport {
        good_id: outcome.good_id,
        locations_written: outcome.locations_written,
        events: log.into_events(),
    })
}

/// Same gate/normalize/upsert sequence against an already-open store,
/// for embedding and tests.
pub fn sync_value(
    store: &mut Store,
    schema: &SchemaNode,
    document: Value,
) -> Result<UpsertOutcome, SyncError> {
    let mut log = SyncLog::default();
    let record = gate_and_normalize(schema, document, &mut log)?;
    store
        .upsert_good_with_stock(&record)
        .map_err(SyncError::Storage)
}

fn gate_and_normalize(
    schema: &SchemaNode,
    document: Value,
    log: &mut SyncLog,
) -> Result<sklad_model::NormalizedGood, SyncError> {
    schema.validate(&document).map_err(SyncError::Validation)?;
    log.emit(SyncStage::Validate, "sync.validate.pass", BTreeMap::new());

    let typed: CatalogDocument =
        serde_json::from_value(document).map_err(|e| SyncError::Model(e.to_string()))?;
    let record = normalize(&typed).map_err(|e| SyncError::Model(e.to_string()))?;
    log.emit(
        SyncStage::Normalize,
        "sync.normalize.complete",
        BTreeMap::from([
            ("good_id".to_string(), record.id.to_string()),
            ("locations".to_string(), record.locations.len().to_string()),
        ]),
    );
    Ok(record)
}

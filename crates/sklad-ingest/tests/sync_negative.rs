// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use sklad_ingest::{sync_catalog, sync_value, Store, SyncError, SyncOptions};
use sklad_model::GoodId;
use sklad_schema::SchemaNode;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(path)
}

fn catalog_schema() -> SchemaNode {
    let raw = std::fs::read_to_string(fixture("tests/fixtures/goods.schema.json"))
        .expect("schema fixture");
    let value: Value = serde_json::from_str(&raw).expect("schema fixture parses");
    SchemaNode::from_value(&value).expect("schema fixture decodes")
}

#[test]
fn fractional_id_fails_validation_with_zero_storage_writes() {
    let tmp = tempdir().expect("tempdir");
    let doc_path = tmp.path().join("doc.json");
    let db_path = tmp.path().join("goods.db");
    fs::write(
        &doc_path,
        serde_json::to_string(&json!({
            "id": 1.4,
            "name": "Refrigerator",
            "package_params": {"width": 120, "height": 270},
            "location_and_quantity": [
                {"location": "lenina-street", "amount": 3}
            ]
        }))
        .expect("serialize doc"),
    )
    .expect("write doc");

    let err = sync_catalog(&SyncOptions {
        document_path: doc_path,
        schema_path: fixture("tests/fixtures/goods.schema.json"),
        db_path: db_path.clone(),
    })
    .expect_err("fractional id must fail the gate");

    let SyncError::Validation(violation) = err else {
        panic!("expected validation error, got: {err}");
    };
    assert_eq!(violation.path, "$.id");
    assert!(
        !db_path.exists(),
        "validation failure must not touch storage"
    );
}

#[test]
fn truncated_document_file_is_malformed_input() {
    let tmp = tempdir().expect("tempdir");
    let doc_path = tmp.path().join("doc.json");
    fs::write(&doc_path, "{\"id\": 3,").expect("write doc");

    let err = sync_catalog(&SyncOptions {
        document_path: doc_path,
        schema_path: fixture("tests/fixtures/goods.schema.json"),
        db_path: tmp.path().join("goods.db"),
    })
    .expect_err("truncated JSON must fail");
    assert!(matches!(err, SyncError::MalformedInput(_)), "got: {err}");
}

#[test]
fn missing_schema_file_is_malformed_input() {
    let tmp = tempdir().expect("tempdir");

    let err = sync_catalog(&SyncOptions {
        document_path: fixture("tests/fixtures/data.json"),
        schema_path: tmp.path().join("absent.schema.json"),
        db_path: tmp.path().join("goods.db"),
    })
    .expect_err("missing schema must fail");
    assert!(matches!(err, SyncError::MalformedInput(_)), "got: {err}");
}

#[test]
fn item_carrying_quantity_key_fails_and_store_stays_empty() {
    let mut store = Store::open_in_memory().expect("in-memory store");
    let schema = catalog_schema();
    let doc = json!({
        "id": 101,
        "name": "Vacuum",
        "package_params": {"width": 25, "height": 35},
        "location_and_quantity": [
            {"location": "lenina-street", "quantity": 2},
            {"location": "central", "amount": 5}
        ]
    });

    let err = sync_value(&mut store, &schema, doc).expect_err("wrong item key must fail");
    let SyncError::Validation(violation) = err else {
        panic!("expected validation error, got: {err}");
    };
    assert_eq!(violation.path, "$.location_and_quantity[0]");

    store.ensure_tables().expect("tables for inspection");
    assert_eq!(store.good_count().expect("good count"), 0);
}

#[test]
fn renamed_location_array_fails_as_missing_required_key() {
    let mut store = Store::open_in_memory().expect("in-memory store");
    let schema = catalog_schema();
    let doc = json!({
        "id": 101,
        "name": "Vacuum",
        "package_params": {"width": 25, "height": 35},
        "location_and_amount": [
            {"location": "lenina-street", "amount": 3}
        ]
    });

    let err = sync_value(&mut store, &schema, doc).expect_err("renamed array must fail");
    let SyncError::Validation(violation) = err else {
        panic!("expected validation error, got: {err}");
    };
    assert!(
        violation.expected.contains("location_and_quantity"),
        "unexpected violation: {violation}"
    );
}

#[test]
fn negative_amount_is_rejected_before_storage() {
    let mut store = Store::open_in_memory().expect("in-memory store");
    let schema = catalog_schema();
    let doc = json!({
        "id": 101,
        "name": "Vacuum",
        "package_params": {"width": 25, "height": 35},
        "location_and_quantity": [
            {"location": "lenina-street", "amount": -5}
        ]
    });

    let err = sync_value(&mut store, &schema, doc).expect_err("negative amount must fail");
    assert!(matches!(err, SyncError::Model(_)), "got: {err}");
    assert!(err.to_string().contains("negative"), "got: {err}");

    store.ensure_tables().expect("tables for inspection");
    assert_eq!(store.good_count().expect("good count"), 0);
    assert_eq!(
        store
            .stock_row_count(GoodId::new(101))
            .expect("stock count"),
        0
    );
}

#[test]
fn undecodable_schema_description_is_a_schema_error() {
    let tmp = tempdir().expect("tempdir");
    let schema_path = tmp.path().join("bad.schema.json");
    fs::write(&schema_path, r#"{"type": "tuple"}"#).expect("write schema");

    let err = sync_catalog(&SyncOptions {
        document_path: fixture("tests/fixtures/data.json"),
        schema_path,
        db_path: tmp.path().join("goods.db"),
    })
    .expect_err("unrecognized schema type must fail");
    assert!(matches!(err, SyncError::Schema(_)), "got: {err}");
}

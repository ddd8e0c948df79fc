//! Live engine integration tests.
//!
//! Exercises the index admin facade and the fixture helpers against a running
//! OpenSearch node. Set `OPENSEARCH_TEST_URL` to enable these tests:
//!
//! ```bash
//! export OPENSEARCH_TEST_URL="http://localhost:9200"
//! cargo test -p index-admin-testkit --test live_engine
//! ```

use std::env;

use serde_json::json;

use index_admin_repository::blocking::IndexAdmin;
use index_admin_repository::{
    ClientConfig, Document, DynamicMapping, FieldMapping, FieldType, IndexError, MappingSchema,
    Version,
};
use index_admin_testkit::{
    delete_index, document_exists, index_document, is_empty_index, server_version,
    unique_index_name, Fixtures,
};

/// Environment variable for the engine URL used by these tests.
const ENGINE_URL_ENV: &str = "OPENSEARCH_TEST_URL";

/// Skip the test when no engine is configured.
macro_rules! require_engine {
    () => {
        match env::var(ENGINE_URL_ENV) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: {} not set. Set this environment variable to run live engine tests.",
                    ENGINE_URL_ENV
                );
                return;
            }
        }
    };
}

fn orders_schema() -> MappingSchema {
    MappingSchema::new()
        .dynamic(DynamicMapping::Strict)
        .field(FieldMapping::keyword("order_id"))
        .field(FieldMapping::text("customer").sub_field(FieldMapping::keyword("raw")))
        .field(FieldMapping::new("placed_at", FieldType::Date))
        .field(FieldMapping::new("quantity", FieldType::Integer))
        .field(FieldMapping::object(
            "shipping",
            vec![FieldMapping::keyword("city"), FieldMapping::keyword("country")],
        ))
}

fn admin(url: &str, index: &str) -> IndexAdmin {
    let config = ClientConfig::for_tests().with_url(url);
    IndexAdmin::connect(&config, index, orders_schema()).unwrap()
}

/// Deletes the index when the test ends, even on panic.
struct Cleanup(String);

impl Drop for Cleanup {
    fn drop(&mut self) {
        delete_index(&[&self.0]);
    }
}

#[test]
fn test_orders_lifecycle() {
    let url = require_engine!();
    let index = unique_index_name("orders");
    let _cleanup = Cleanup(index.clone());
    let admin = admin(&url, &index);

    assert!(admin.create().unwrap());
    assert!(admin.exists().unwrap());
    assert!(admin.delete().unwrap());
    assert!(!admin.exists().unwrap());
}

#[test]
fn test_delete_missing_index_is_false() {
    let url = require_engine!();
    let admin = admin(&url, &unique_index_name("missing"));

    assert!(!admin.delete().unwrap());
}

#[test]
fn test_second_create_conflicts() {
    let url = require_engine!();
    let index = unique_index_name("orders");
    let _cleanup = Cleanup(index.clone());
    let admin = admin(&url, &index);

    assert!(admin.create().unwrap());
    let err = admin.create().unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {:?}", err);
}

#[test]
fn test_create_with_invalid_settings() {
    let url = require_engine!();
    let index = unique_index_name("orders");
    let _cleanup = Cleanup(index.clone());
    let admin = admin(&url, &index);

    let settings = Document::new().with("index", json!({ "number_of_shards": "many" }));
    let err = admin.create_with_settings(settings).unwrap_err();
    assert!(matches!(err, IndexError::InvalidArgument(_)), "got {:?}", err);
}

#[test]
fn test_settings_subset_of_settings_with_defaults() {
    let url = require_engine!();
    let index = unique_index_name("orders");
    let _cleanup = Cleanup(index.clone());
    let admin = admin(&url, &index);

    let settings = Document::new().with("index", json!({ "number_of_shards": 2, "number_of_replicas": 0 }));
    assert!(admin.create_with_settings(settings).unwrap());

    let plain = admin.get_settings().unwrap();
    let with_defaults = admin.get_settings_with_defaults(true).unwrap();

    assert_eq!(plain.get("index.number_of_shards"), Some(&json!("2")));
    assert!(plain.keys().all(|k| with_defaults.contains_key(k)));
    assert!(with_defaults.len() > plain.len());
}

#[test]
fn test_put_mapping_then_get_mapping() {
    let url = require_engine!();
    let index = unique_index_name("orders");
    let _cleanup = Cleanup(index.clone());
    let admin = admin(&url, &index);

    admin.create().unwrap();
    assert!(admin.put_default_mapping().unwrap());

    assert_eq!(admin.get_mapping().unwrap(), admin.create_mapping().unwrap());
}

#[test]
fn test_is_empty_index_and_document_exists() {
    let url = require_engine!();
    let index = unique_index_name("orders");
    let _cleanup = Cleanup(index.clone());
    let admin = admin(&url, &index);

    admin.create().unwrap();
    admin.put_default_mapping().unwrap();
    assert!(is_empty_index(&index).unwrap());
    assert!(!document_exists(&index, "order-1").unwrap());

    index_document(
        &index,
        "order-1",
        &json!({ "order_id": "order-1", "customer": "Ada", "quantity": 2 }),
    )
    .unwrap();
    admin.refresh().unwrap();

    assert!(!is_empty_index(&index).unwrap());
    assert!(document_exists(&index, "order-1").unwrap());
}

#[test]
fn test_document_exists_missing_index_fails() {
    let _url = require_engine!();
    let err = document_exists(&unique_index_name("missing"), "1").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_server_version() {
    let _url = require_engine!();
    assert!(server_version().unwrap() > Version::ZERO);
}

#[tokio::test]
async fn test_async_fixtures() {
    let url = require_engine!();
    let fixtures = Fixtures::new(ClientConfig::for_tests().with_url(url.as_str()));
    let index = unique_index_name("orders");

    let config = fixtures.config().clone();
    let admin = index_admin_repository::IndexAdmin::connect(&config, &index, orders_schema()).unwrap();

    assert!(admin.create().await.unwrap());
    assert!(fixtures.is_empty_index(&index).await.unwrap());

    fixtures.delete_index(&[&index]).await;
    assert!(!admin.exists().await.unwrap());
}

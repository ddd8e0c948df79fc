//! # Index Admin Testkit
//!
//! Fixture helpers for test suites that run against a live search engine.
//!
//! Each helper opens its own short-lived connection, performs one request and
//! releases the connection before returning. Cleanup ([`delete_index`])
//! swallows every failure; assertion helpers ([`server_version`],
//! [`is_empty_index`], [`document_exists`]) propagate theirs so that the
//! calling test fails.
//!
//! The functions at the crate root are synchronous and drive a private
//! runtime, so they must be called from plain `#[test]` functions. Async tests
//! use [`Fixtures`] directly.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use index_admin_testkit::{delete_index, document_exists, unique_index_name};
//!
//! #[test]
//! fn writes_the_order() {
//!     let index = unique_index_name("orders");
//!     // ... exercise the code under test
//!     assert!(document_exists(&index, "order-1").unwrap());
//!     delete_index(&[&index]);
//! }
//! ```

pub mod fixtures;

use std::future::Future;

use serde_json::Value;
use tokio::runtime::Builder;
use tracing::debug;

use index_admin_repository::IndexError;
use index_admin_shared::Version;

pub use fixtures::{unique_index_name, Fixtures};

/// Run one fixture future on a private current-thread runtime.
fn block_on<F, T>(future: F) -> Result<T, IndexError>
where
    F: Future<Output = Result<T, IndexError>>,
{
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| IndexError::transport(format!("failed to start runtime: {}", e)))?;
    runtime.block_on(future)
}

/// Probe the engine's version. See [`Fixtures::server_version`].
pub fn server_version() -> Result<Version, IndexError> {
    block_on(Fixtures::default().server_version())
}

/// Delete the given indices, ignoring every failure. See [`Fixtures::delete_index`].
pub fn delete_index(indexes: &[&str]) {
    if indexes.is_empty() {
        return;
    }
    if let Err(e) = block_on(async {
        Fixtures::default().delete_index(indexes).await;
        Ok(())
    }) {
        debug!(error = %e, "Skipping index cleanup");
    }
}

/// Whether `index` holds no documents. See [`Fixtures::is_empty_index`].
pub fn is_empty_index(index: &str) -> Result<bool, IndexError> {
    block_on(Fixtures::default().is_empty_index(index))
}

/// Whether a document with `id` exists in `index`. See [`Fixtures::document_exists`].
pub fn document_exists(index: &str, id: &str) -> Result<bool, IndexError> {
    block_on(Fixtures::default().document_exists(index, id))
}

/// Index one searchable document. See [`Fixtures::index_document`].
pub fn index_document(index: &str, id: &str, document: &Value) -> Result<(), IndexError> {
    block_on(Fixtures::default().index_document(index, id, document))
}

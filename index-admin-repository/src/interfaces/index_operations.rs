//! Index operations trait definition.
//!
//! This module defines the backend seam for index administration, allowing for
//! different implementations (OpenSearch, Elasticsearch, in-memory mocks).

use async_trait::async_trait;

use crate::errors::IndexError;
use index_admin_shared::{Document, IndexCoordinates};

/// One remote call per method against the index an implementation is bound to.
///
/// Implementations are injected into [`IndexAdmin`](crate::IndexAdmin) and must
/// not retry, batch or cache: every failure is returned as an [`IndexError`]
/// classified from the engine's answer.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so that one instance can serve
/// concurrent calls from several tasks.
#[async_trait]
pub trait IndexOperations: Send + Sync {
    /// The index this implementation is bound to.
    fn index_coordinates(&self) -> &IndexCoordinates;

    /// Create the index, optionally with a settings payload.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the engine acknowledged the creation
    /// * `Err(IndexError::Conflict)` - If the index already exists
    /// * `Err(IndexError::InvalidArgument)` - If the settings were rejected
    async fn create_index(&self, settings: Option<&Document>) -> Result<bool, IndexError>;

    /// Delete the index.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index was deleted
    /// * `Ok(false)` - If the index did not exist
    async fn delete_index(&self) -> Result<bool, IndexError>;

    /// Check whether the index exists.
    async fn index_exists(&self) -> Result<bool, IndexError>;

    /// Make all recent writes to the index visible to search.
    async fn refresh_index(&self) -> Result<(), IndexError>;

    /// Store a mapping on the index.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the engine acknowledged the mapping
    async fn put_mapping(&self, mapping: &Document) -> Result<bool, IndexError>;

    /// Read the index's current mapping.
    async fn get_mapping(&self) -> Result<Document, IndexError>;

    /// Read the index's settings as flat dotted keys.
    ///
    /// With `include_defaults`, engine defaults are merged in underneath the
    /// explicitly set values.
    async fn get_settings(&self, include_defaults: bool) -> Result<Document, IndexError>;
}

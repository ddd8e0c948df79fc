//! Index admin facade.
//!
//! This module provides the main entry point for administering one index.
//! Application code uses it to create, inspect and delete the index and to
//! manage its mapping and settings.

use std::future::Future;

use tracing::debug;

use crate::config::ClientConfig;
use crate::errors::IndexError;
use crate::interfaces::IndexOperations;
use crate::opensearch::OpenSearchIndexOperations;
use index_admin_shared::{Document, IndexCoordinates, MappingSchema};

/// The main facade for administering one index.
///
/// Each network-touching method issues exactly one remote call through the
/// injected [`IndexOperations`] and resolves once, with a value or an error.
/// Dropping a returned future cancels the pending request. The facade holds no
/// mutable state, so concurrent calls are allowed; ordering between them is up
/// to the caller.
pub struct IndexAdmin {
    operations: Box<dyn IndexOperations>,
    schema: MappingSchema,
}

impl IndexAdmin {
    /// Create a facade over the given backend, bound to the entity `schema`.
    pub fn new(operations: Box<dyn IndexOperations>, schema: MappingSchema) -> Self {
        Self { operations, schema }
    }

    /// Create a facade for `index` on an OpenSearch engine.
    pub fn connect(
        config: &ClientConfig,
        index: &str,
        schema: MappingSchema,
    ) -> Result<Self, IndexError> {
        let coordinates = IndexCoordinates::of(index)?;
        let operations = OpenSearchIndexOperations::new(config, coordinates)?;
        Ok(Self::new(Box::new(operations), schema))
    }

    /// The index this facade is bound to.
    pub fn index_coordinates(&self) -> &IndexCoordinates {
        self.operations.index_coordinates()
    }

    /// The entity schema used by [`IndexAdmin::create_mapping`].
    pub fn schema(&self) -> &MappingSchema {
        &self.schema
    }

    /// Create the index.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index was created
    /// * `Err(IndexError::Conflict)` - If the index already exists
    pub async fn create(&self) -> Result<bool, IndexError> {
        self.operations.create_index(None).await
    }

    /// Create the index with the given settings.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index was created
    /// * `Err(IndexError::Conflict)` - If the index already exists
    /// * `Err(IndexError::InvalidArgument)` - If the settings were rejected
    pub async fn create_with_settings(&self, settings: Document) -> Result<bool, IndexError> {
        self.operations.create_index(Some(&settings)).await
    }

    /// Delete the index.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index was deleted
    /// * `Ok(false)` - If the index did not exist
    pub async fn delete(&self) -> Result<bool, IndexError> {
        self.operations.delete_index().await
    }

    /// Check whether the index exists.
    pub async fn exists(&self) -> Result<bool, IndexError> {
        self.operations.index_exists().await
    }

    /// Refresh the index so that recent writes become searchable.
    pub async fn refresh(&self) -> Result<(), IndexError> {
        self.operations.refresh_index().await
    }

    /// Build the mapping document for the bound entity schema.
    ///
    /// Local only; nothing is sent to the engine.
    pub fn create_mapping(&self) -> Result<Document, IndexError> {
        self.create_mapping_for(&self.schema)
    }

    /// Build the mapping document for an arbitrary schema.
    ///
    /// Local only; nothing is sent to the engine.
    pub fn create_mapping_for(&self, schema: &MappingSchema) -> Result<Document, IndexError> {
        Ok(schema.to_document()?)
    }

    /// Write a mapping to the index.
    ///
    /// `mapping` is only polled once this call is awaited, so the document can
    /// be computed lazily. An error from `mapping` is returned unchanged and
    /// nothing is sent.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the engine stored the mapping
    pub async fn put_mapping<F>(&self, mapping: F) -> Result<bool, IndexError>
    where
        F: Future<Output = Result<Document, IndexError>>,
    {
        let mapping = mapping.await?;
        debug!(index = %self.index_coordinates(), fields = mapping.len(), "Writing mapping");
        self.operations.put_mapping(&mapping).await
    }

    /// Write an already built mapping document to the index.
    pub async fn put_mapping_document(&self, mapping: Document) -> Result<bool, IndexError> {
        self.put_mapping(async { Ok(mapping) }).await
    }

    /// Build the mapping for the bound entity schema and write it to the index.
    pub async fn put_default_mapping(&self) -> Result<bool, IndexError> {
        self.put_mapping(async { self.create_mapping() }).await
    }

    /// Build the mapping for `schema` and write it to the index.
    pub async fn put_mapping_for(&self, schema: &MappingSchema) -> Result<bool, IndexError> {
        self.put_mapping(async { self.create_mapping_for(schema) })
            .await
    }

    /// Read the index's current mapping.
    pub async fn get_mapping(&self) -> Result<Document, IndexError> {
        self.operations.get_mapping().await
    }

    /// Read the index's explicitly set settings.
    pub async fn get_settings(&self) -> Result<Document, IndexError> {
        self.get_settings_with_defaults(false).await
    }

    /// Read the index's settings, optionally including engine defaults.
    pub async fn get_settings_with_defaults(
        &self,
        include_defaults: bool,
    ) -> Result<Document, IndexError> {
        self.operations.get_settings(include_defaults).await
    }
}

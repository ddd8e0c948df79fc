//! Blocking index admin facade.
//!
//! Wraps [`crate::IndexAdmin`] with a private current-thread runtime for
//! callers without an async runtime. Calling these methods from inside a
//! tokio runtime panics; async code should use the async facade directly.

use std::future::Future;

use tokio::runtime::{Builder, Runtime};

use crate::config::ClientConfig;
use crate::errors::IndexError;
use index_admin_shared::{Document, IndexCoordinates, MappingSchema};

/// Synchronous counterpart of [`crate::IndexAdmin`].
pub struct IndexAdmin {
    inner: crate::IndexAdmin,
    runtime: Runtime,
}

impl IndexAdmin {
    /// Wrap an async facade.
    pub fn new(inner: crate::IndexAdmin) -> Result<Self, IndexError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| IndexError::transport(format!("failed to start runtime: {}", e)))?;
        Ok(Self { inner, runtime })
    }

    /// Create a blocking facade for `index` on an OpenSearch engine.
    pub fn connect(
        config: &ClientConfig,
        index: &str,
        schema: MappingSchema,
    ) -> Result<Self, IndexError> {
        Self::new(crate::IndexAdmin::connect(config, index, schema)?)
    }

    /// The index this facade is bound to.
    pub fn index_coordinates(&self) -> &IndexCoordinates {
        self.inner.index_coordinates()
    }

    fn block_on<F, T>(&self, future: F) -> Result<T, IndexError>
    where
        F: Future<Output = Result<T, IndexError>>,
    {
        self.runtime.block_on(future)
    }

    /// See [`crate::IndexAdmin::create`].
    pub fn create(&self) -> Result<bool, IndexError> {
        self.block_on(self.inner.create())
    }

    /// See [`crate::IndexAdmin::create_with_settings`].
    pub fn create_with_settings(&self, settings: Document) -> Result<bool, IndexError> {
        self.block_on(self.inner.create_with_settings(settings))
    }

    /// See [`crate::IndexAdmin::delete`].
    pub fn delete(&self) -> Result<bool, IndexError> {
        self.block_on(self.inner.delete())
    }

    /// See [`crate::IndexAdmin::exists`].
    pub fn exists(&self) -> Result<bool, IndexError> {
        self.block_on(self.inner.exists())
    }

    /// See [`crate::IndexAdmin::refresh`].
    pub fn refresh(&self) -> Result<(), IndexError> {
        self.block_on(self.inner.refresh())
    }

    /// See [`crate::IndexAdmin::create_mapping`].
    pub fn create_mapping(&self) -> Result<Document, IndexError> {
        self.inner.create_mapping()
    }

    /// See [`crate::IndexAdmin::create_mapping_for`].
    pub fn create_mapping_for(&self, schema: &MappingSchema) -> Result<Document, IndexError> {
        self.inner.create_mapping_for(schema)
    }

    /// Write a mapping produced by `mapping` to the index.
    pub fn put_mapping<F>(&self, mapping: F) -> Result<bool, IndexError>
    where
        F: FnOnce() -> Result<Document, IndexError>,
    {
        self.block_on(self.inner.put_mapping(async move { mapping() }))
    }

    /// See [`crate::IndexAdmin::put_default_mapping`].
    pub fn put_default_mapping(&self) -> Result<bool, IndexError> {
        self.block_on(self.inner.put_default_mapping())
    }

    /// See [`crate::IndexAdmin::put_mapping_for`].
    pub fn put_mapping_for(&self, schema: &MappingSchema) -> Result<bool, IndexError> {
        self.block_on(self.inner.put_mapping_for(schema))
    }

    /// See [`crate::IndexAdmin::get_mapping`].
    pub fn get_mapping(&self) -> Result<Document, IndexError> {
        self.block_on(self.inner.get_mapping())
    }

    /// See [`crate::IndexAdmin::get_settings`].
    pub fn get_settings(&self) -> Result<Document, IndexError> {
        self.block_on(self.inner.get_settings())
    }

    /// See [`crate::IndexAdmin::get_settings_with_defaults`].
    pub fn get_settings_with_defaults(&self, include_defaults: bool) -> Result<Document, IndexError> {
        self.block_on(self.inner.get_settings_with_defaults(include_defaults))
    }
}

//! # Index Admin Repository
//!
//! This crate provides the index administration facade and its backends. It
//! includes definitions for errors, the `IndexOperations` backend trait, a
//! concrete implementation for OpenSearch, and a blocking variant of the
//! facade.
//!
//! ```ignore
//! let config = ClientConfig::from_env()?;
//! let admin = IndexAdmin::connect(&config, "orders", schema)?;
//!
//! if !admin.exists().await? {
//!     admin.create().await?;
//!     admin.put_default_mapping().await?;
//! }
//! ```

pub mod blocking;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;

#[cfg(test)]
mod testing;

pub use client::IndexAdmin;
pub use config::ClientConfig;
pub use errors::IndexError;
pub use interfaces::IndexOperations;
pub use opensearch::OpenSearchIndexOperations;

pub use index_admin_shared::{
    Document, DynamicMapping, FieldMapping, FieldType, IndexCoordinates, MappingSchema, Version,
};

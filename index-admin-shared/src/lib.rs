//! # Index Admin Shared
//!
//! Data model shared by the index admin facade, its OpenSearch backend and the
//! test harness.
//!
//! ## Modules
//!
//! - [`document`]: order-preserving JSON documents for mappings and settings
//! - [`coordinates`]: the index a facade instance is bound to
//! - [`mapping`]: statically declared mapping schemas
//! - [`version`]: server version numbers
//! - [`errors`]: validation errors raised while building the model

pub mod coordinates;
pub mod document;
pub mod errors;
pub mod mapping;
pub mod version;

pub use coordinates::IndexCoordinates;
pub use document::Document;
pub use errors::ModelError;
pub use mapping::{DynamicMapping, FieldMapping, FieldType, MappingSchema};
pub use version::Version;

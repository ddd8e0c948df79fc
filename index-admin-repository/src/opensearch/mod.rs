//! OpenSearch implementation of the index operations.
//!
//! This module provides a concrete implementation of `IndexOperations`
//! using OpenSearch as the backend.

mod client;
pub mod responses;

pub use client::{connect, OpenSearchIndexOperations};

//! Interface definitions for index administration backends.
//!
//! This module defines the abstract `IndexOperations` trait that allows
//! for dependency injection and swappable search backend implementations.

mod index_operations;

pub use index_operations::IndexOperations;

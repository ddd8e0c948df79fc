//! Error types for the index admin repository.

mod index_error;

pub use index_error::IndexError;

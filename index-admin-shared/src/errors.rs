//! Validation errors for the shared data model.

use thiserror::Error;

/// Errors raised when a model value fails local validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The index name violates the engine's naming rules.
    #[error("Invalid index name '{name}': {reason}")]
    InvalidIndexName { name: String, reason: String },

    /// A JSON value could not be used as a document.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The mapping schema is inconsistent.
    #[error("Invalid mapping schema: {0}")]
    InvalidSchema(String),

    /// A version string could not be parsed.
    #[error("Invalid version '{0}'")]
    InvalidVersion(String),
}

impl ModelError {
    /// Create an invalid index name error.
    pub fn invalid_index_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIndexName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid document error.
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(msg: impl Into<String>) -> Self {
        Self::InvalidSchema(msg.into())
    }
}

//! Index coordinates.
//!
//! An [`IndexCoordinates`] value is the binding between a facade instance and
//! the single remote index it administers. It is fixed at construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Maximum index name length in bytes accepted by the engine.
pub const MAX_INDEX_NAME_BYTES: usize = 255;

/// Characters the engine rejects anywhere in an index name.
const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ',', '#', ':'];

/// The remote index an admin facade is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexCoordinates {
    name: String,
}

impl IndexCoordinates {
    /// Bind to the named index, validating the name locally.
    pub fn of(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        validate_index_name(&name)?;
        Ok(Self { name })
    }

    /// The index name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for IndexCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<&str> for IndexCoordinates {
    type Error = ModelError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::of(name)
    }
}

/// Check a name against the engine's index naming rules.
pub fn validate_index_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::invalid_index_name(name, "must not be empty"));
    }
    if name == "." || name == ".." {
        return Err(ModelError::invalid_index_name(name, "must not be '.' or '..'"));
    }
    if name.len() > MAX_INDEX_NAME_BYTES {
        return Err(ModelError::invalid_index_name(
            name,
            format!("must not be longer than {} bytes", MAX_INDEX_NAME_BYTES),
        ));
    }
    if name.starts_with(['-', '_', '+']) {
        return Err(ModelError::invalid_index_name(
            name,
            "must not start with '-', '_' or '+'",
        ));
    }
    if name.chars().any(|c| c.is_uppercase()) {
        return Err(ModelError::invalid_index_name(name, "must be lowercase"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| c.is_whitespace() || FORBIDDEN_CHARS.contains(c))
    {
        return Err(ModelError::invalid_index_name(
            name,
            format!("must not contain '{}'", c),
        ));
    }
    Ok(())
}

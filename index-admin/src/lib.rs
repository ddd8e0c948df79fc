//! # Index Admin
//!
//! Command line front end for the index admin facade.
//!
//! This crate wires configuration, logging and the facade together and maps
//! each subcommand onto one facade call.

pub mod commands;
pub mod config;

pub use commands::Command;
pub use config::Dependencies;

use index_admin_repository::IndexError;
use thiserror::Error;

/// Errors that can occur while running an admin command.
#[derive(Error, Debug)]
pub enum AdminError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Index operation error.
    #[error("Index error: {0}")]
    IndexError(#[from] IndexError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AdminError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

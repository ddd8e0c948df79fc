//! Admin subcommands.
//!
//! Each command maps onto exactly one facade call and yields a JSON value for
//! printing.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde_json::{json, Value};
use tracing::debug;

use crate::AdminError;
use index_admin_repository::IndexAdmin;
use index_admin_shared::Document;

/// Operations on the bound index.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the index
    Create {
        /// JSON file with index settings
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Delete the index (prints false if it did not exist)
    Delete,
    /// Check whether the index exists
    Exists,
    /// Refresh the index
    Refresh,
    /// Write a mapping read from a JSON file
    PutMapping {
        /// JSON file with the mapping definition
        #[arg(long)]
        file: PathBuf,
    },
    /// Print the current mapping
    GetMapping,
    /// Print the index settings
    GetSettings {
        /// Include engine default settings
        #[arg(long)]
        include_defaults: bool,
    },
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create { .. } => "create",
            Command::Delete => "delete",
            Command::Exists => "exists",
            Command::Refresh => "refresh",
            Command::PutMapping { .. } => "put-mapping",
            Command::GetMapping => "get-mapping",
            Command::GetSettings { .. } => "get-settings",
        }
    }
}

/// Run `command` against the facade.
pub async fn run(admin: &IndexAdmin, command: &Command) -> Result<Value, AdminError> {
    debug!(command = command.name(), index = %admin.index_coordinates(), "Running command");

    let output = match command {
        Command::Create { settings: None } => json!(admin.create().await?),
        Command::Create {
            settings: Some(path),
        } => {
            let settings = load_document(path)?;
            json!(admin.create_with_settings(settings).await?)
        }
        Command::Delete => json!(admin.delete().await?),
        Command::Exists => json!(admin.exists().await?),
        Command::Refresh => {
            admin.refresh().await?;
            json!(true)
        }
        Command::PutMapping { file } => {
            let mapping = load_document(file)?;
            json!(admin.put_mapping_document(mapping).await?)
        }
        Command::GetMapping => admin.get_mapping().await?.into_value(),
        Command::GetSettings { include_defaults } => admin
            .get_settings_with_defaults(*include_defaults)
            .await?
            .into_value(),
    };

    Ok(output)
}

/// Read a JSON object from `path`.
pub fn load_document(path: &Path) -> Result<Document, AdminError> {
    let text = fs::read_to_string(path)?;
    Document::parse(&text).map_err(|e| {
        AdminError::config(format!("{} is not a JSON object: {}", path.display(), e))
    })
}

//! Dependency initialization and wiring for the admin tool.

use tracing::info;

use crate::AdminError;
use index_admin_repository::{ClientConfig, IndexAdmin, MappingSchema};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The facade bound to the requested index.
    pub admin: IndexAdmin,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: engine URL (default: http://localhost:9200), overridden by `url`
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: basic auth credentials
    /// - `OPENSEARCH_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AdminError)` - If the configuration or the index name is invalid
    pub fn new(index: &str, url: Option<&str>) -> Result<Self, AdminError> {
        let mut config = ClientConfig::from_env()
            .map_err(|e| AdminError::config(format!("Invalid engine configuration: {}", e)))?;
        if let Some(url) = url {
            config = config.with_url(url);
        }

        info!(
            url = %config.url,
            index = %index,
            authenticated = config.username.is_some(),
            "Initializing dependencies"
        );

        let admin = IndexAdmin::connect(&config, index, MappingSchema::new())?;

        Ok(Self { admin })
    }
}

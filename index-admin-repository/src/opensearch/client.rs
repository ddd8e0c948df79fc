//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `IndexOperations`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{
        IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesGetMappingParts,
        IndicesGetSettingsParts, IndicesPutMappingParts, IndicesRefreshParts,
    },
    OpenSearch,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::errors::IndexError;
use crate::interfaces::IndexOperations;
use crate::opensearch::responses;
use index_admin_shared::{Document, IndexCoordinates};

/// Build an OpenSearch client from the given configuration.
///
/// No request is sent; an unreachable engine surfaces on the first call.
///
/// # Returns
///
/// * `Ok(OpenSearch)` - A client ready to send requests
/// * `Err(IndexError::Transport)` - If the URL is invalid or transport setup fails
pub fn connect(config: &ClientConfig) -> Result<OpenSearch, IndexError> {
    let parsed_url = Url::parse(&config.url).map_err(|e| IndexError::transport(e.to_string()))?;

    let conn_pool = SingleNodeConnectionPool::new(parsed_url);
    let mut builder = TransportBuilder::new(conn_pool)
        .disable_proxy()
        .timeout(config.timeout);

    if let Some(ref username) = config.username {
        let password = config.password.clone().unwrap_or_default();
        builder = builder.auth(Credentials::Basic(username.clone(), password));
    }

    let transport = builder
        .build()
        .map_err(|e| IndexError::transport(e.to_string()))?;

    Ok(OpenSearch::new(transport))
}

/// OpenSearch implementation of [`IndexOperations`].
///
/// Bound to one index at construction. The underlying client is shared by all
/// calls for the lifetime of this value.
///
/// # Example
///
/// ```ignore
/// let config = ClientConfig::from_env()?;
/// let coordinates = IndexCoordinates::of("orders")?;
/// let operations = OpenSearchIndexOperations::new(&config, coordinates)?;
///
/// if !operations.index_exists().await? {
///     operations.create_index(None).await?;
/// }
/// ```
pub struct OpenSearchIndexOperations {
    client: OpenSearch,
    coordinates: IndexCoordinates,
}

impl OpenSearchIndexOperations {
    /// Create index operations for `coordinates` on the engine at `config.url`.
    pub fn new(config: &ClientConfig, coordinates: IndexCoordinates) -> Result<Self, IndexError> {
        let client = connect(config)?;

        info!(
            url = %config.url,
            index = %coordinates,
            "Created OpenSearch index operations"
        );

        Ok(Self::with_client(client, coordinates))
    }

    /// Create index operations on an existing client.
    pub fn with_client(client: OpenSearch, coordinates: IndexCoordinates) -> Self {
        Self {
            client,
            coordinates,
        }
    }

    fn index(&self) -> &str {
        self.coordinates.name()
    }

    /// Turn a non-success response into an error, logging the engine's answer.
    async fn failure(response: Response, operation: &str) -> IndexError {
        let status = response.status_code();
        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, "{} request failed", operation);
        IndexError::from_response(status.as_u16(), &error_body)
    }

    async fn read_json(response: Response, operation: &str) -> Result<Value, IndexError> {
        let status = response.status_code();
        if !status.is_success() {
            return Err(Self::failure(response, operation).await);
        }
        response.json::<Value>().await.map_err(|e| {
            IndexError::response(
                status.as_u16(),
                format!("{} response is not valid JSON: {}", operation, e),
            )
        })
    }
}

#[async_trait]
impl IndexOperations for OpenSearchIndexOperations {
    fn index_coordinates(&self) -> &IndexCoordinates {
        &self.coordinates
    }

    #[instrument(skip(self, settings), fields(index = %self.coordinates))]
    async fn create_index(&self, settings: Option<&Document>) -> Result<bool, IndexError> {
        let body = match settings {
            Some(settings) => json!({ "settings": settings }),
            None => json!({}),
        };

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(self.index()))
            .body(body)
            .send()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        let body = Self::read_json(response, "Create index").await?;
        let created = responses::acknowledged(&body);

        info!(created = created, "Index created");
        Ok(created)
    }

    #[instrument(skip(self), fields(index = %self.coordinates))]
    async fn delete_index(&self) -> Result<bool, IndexError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[self.index()]))
            .send()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        let status = response.status_code().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        match responses::index_deleted(status, &text) {
            Ok(true) => {
                info!("Index deleted");
                Ok(true)
            }
            Ok(false) => {
                debug!(status = status, "Index did not exist");
                Ok(false)
            }
            Err(e) => {
                error!(status = status, body = %text, "Delete index request failed");
                Err(e)
            }
        }
    }

    #[instrument(skip(self), fields(index = %self.coordinates))]
    async fn index_exists(&self) -> Result<bool, IndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[self.index()]))
            .send()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            return Ok(true);
        }
        if status.as_u16() == 404 {
            return Ok(false);
        }
        Err(Self::failure(response, "Index exists").await)
    }

    #[instrument(skip(self), fields(index = %self.coordinates))]
    async fn refresh_index(&self) -> Result<(), IndexError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[self.index()]))
            .send()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(Self::failure(response, "Refresh index").await);
        }

        debug!("Index refreshed");
        Ok(())
    }

    #[instrument(skip(self, mapping), fields(index = %self.coordinates))]
    async fn put_mapping(&self, mapping: &Document) -> Result<bool, IndexError> {
        let response = self
            .client
            .indices()
            .put_mapping(IndicesPutMappingParts::Index(&[self.index()]))
            .body(mapping)
            .send()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        let body = Self::read_json(response, "Put mapping").await?;
        let stored = responses::acknowledged(&body);

        debug!(stored = stored, "Mapping written");
        Ok(stored)
    }

    #[instrument(skip(self), fields(index = %self.coordinates))]
    async fn get_mapping(&self) -> Result<Document, IndexError> {
        let response = self
            .client
            .indices()
            .get_mapping(IndicesGetMappingParts::Index(&[self.index()]))
            .send()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        let body = Self::read_json(response, "Get mapping").await?;
        responses::mapping_from_response(body, self.index())
    }

    #[instrument(skip(self), fields(index = %self.coordinates))]
    async fn get_settings(&self, include_defaults: bool) -> Result<Document, IndexError> {
        let response = self
            .client
            .indices()
            .get_settings(IndicesGetSettingsParts::Index(&[self.index()]))
            .flat_settings(true)
            .include_defaults(include_defaults)
            .send()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        let body = Self::read_json(response, "Get settings").await?;
        responses::settings_from_response(body, self.index(), include_defaults)
    }
}

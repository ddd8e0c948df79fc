//! Async fixture helpers.
//!
//! Every helper builds a fresh client, sends exactly one request per index and
//! drops the client before returning, on success and on error alike.

use opensearch::{
    http::response::Response, indices::IndicesDeleteParts, params::Refresh, GetParts, IndexParts,
    OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use index_admin_repository::opensearch::{connect, responses};
use index_admin_repository::{ClientConfig, IndexError};
use index_admin_shared::Version;

/// Fixture helpers bound to one engine configuration.
#[derive(Debug, Clone)]
pub struct Fixtures {
    config: ClientConfig,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::new(ClientConfig::for_tests())
    }
}

impl Fixtures {
    /// Use the given engine configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// The engine configuration in use.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn client(&self) -> Result<OpenSearch, IndexError> {
        connect(&self.config)
    }

    /// Probe the engine's version.
    ///
    /// Any failure propagates so that the calling test fails.
    pub async fn server_version(&self) -> Result<Version, IndexError> {
        let client = self.client()?;
        let response = client
            .info()
            .send()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        let body = read_json(response).await?;
        let number = responses::version_number(&body)
            .ok_or_else(|| IndexError::response(200, "info response has no version number"))?;

        Ok(number.parse::<Version>()?)
    }

    /// Delete the given indices, ignoring every failure.
    ///
    /// Meant for cleanup: a missing index or an unreachable engine is not an
    /// error here.
    pub async fn delete_index(&self, indexes: &[&str]) {
        if indexes.is_empty() {
            return;
        }

        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                debug!(error = %e, "Skipping index cleanup");
                return;
            }
        };

        for index in indexes {
            match client
                .indices()
                .delete(IndicesDeleteParts::Index(&[*index]))
                .send()
                .await
            {
                Ok(response) => {
                    debug!(index = %index, status = %response.status_code(), "Cleanup delete sent")
                }
                Err(e) => debug!(index = %index, error = %e, "Ignoring cleanup failure"),
            }
        }
    }

    /// Whether `index` holds no documents.
    ///
    /// Runs a match-all search that returns no hits, only the total count.
    pub async fn is_empty_index(&self, index: &str) -> Result<bool, IndexError> {
        let client = self.client()?;
        let response = client
            .search(SearchParts::Index(&[index]))
            .body(json!({
                "query": { "match_all": {} },
                "size": 0,
                "track_total_hits": true
            }))
            .send()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        let body = read_json(response).await?;
        let total = responses::total_hits(&body)
            .ok_or_else(|| IndexError::response(200, "search response has no total hit count"))?;

        Ok(total == 0)
    }

    /// Whether a document with `id` exists in `index`.
    ///
    /// A missing document yields `false`; a missing index is an error.
    pub async fn document_exists(&self, index: &str, id: &str) -> Result<bool, IndexError> {
        let client = self.client()?;
        let response = client
            .get(GetParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        let status = response.status_code().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        document_found(status, &text)
    }

    /// Index one document and make it immediately searchable.
    pub async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<(), IndexError> {
        let client = self.client()?;
        let response = client
            .index(IndexParts::IndexId(index, id))
            .body(document)
            .refresh(Refresh::True)
            .send()
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        read_json(response).await.map(|_| ())
    }
}

/// A fresh index name for one test, e.g. `orders-3f2a...`.
pub fn unique_index_name(prefix: &str) -> String {
    format!("{}-{}", prefix.to_lowercase(), Uuid::new_v4().simple())
}

async fn read_json(response: Response) -> Result<Value, IndexError> {
    let status = response.status_code().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| IndexError::transport(e.to_string()))?;

    if !(200..300).contains(&status) {
        return Err(IndexError::from_response(status, &text));
    }
    serde_json::from_str(&text).map_err(|e| IndexError::response(status, e.to_string()))
}

/// Interpret a get-document answer.
fn document_found(status: u16, body: &str) -> Result<bool, IndexError> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let found = parsed
        .as_ref()
        .and_then(|v| v.get("found"))
        .and_then(Value::as_bool);

    match (status, found) {
        (200..=299, found) => Ok(found.unwrap_or(true)),
        (404, Some(false)) => Ok(false),
        _ => Err(IndexError::from_response(status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn unreachable() -> Fixtures {
        Fixtures::new(
            ClientConfig::default()
                .with_url("http://127.0.0.1:1")
                .with_timeout(Duration::from_secs(1)),
        )
    }

    #[test]
    fn test_unique_index_name() {
        let a = unique_index_name("Orders");
        let b = unique_index_name("Orders");

        assert!(a.starts_with("orders-"));
        assert_ne!(a, b);
        assert!(index_admin_shared::IndexCoordinates::of(a.as_str()).is_ok());
    }

    #[test]
    fn test_document_found() {
        let found = r#"{"_index":"orders","_id":"1","found":true,"_source":{}}"#;
        let missing_doc = r#"{"_index":"orders","_id":"1","found":false}"#;
        let missing_index = r#"{"error":{"type":"index_not_found_exception","reason":"no such index [orders]"},"status":404}"#;

        assert!(document_found(200, found).unwrap());
        assert!(!document_found(404, missing_doc).unwrap());
        assert!(document_found(404, missing_index).unwrap_err().is_not_found());
        assert!(matches!(
            document_found(503, "").unwrap_err(),
            IndexError::Response { status: 503, .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_index_ignores_failures() {
        // Completes without panicking or returning an error
        unreachable().delete_index(&["orders", "customers"]).await;
        unreachable().delete_index(&[]).await;
    }

    #[tokio::test]
    async fn test_assertion_helpers_propagate_failures() {
        let fixtures = unreachable();

        assert!(matches!(
            fixtures.server_version().await.unwrap_err(),
            IndexError::Transport(_)
        ));
        assert!(matches!(
            fixtures.is_empty_index("orders").await.unwrap_err(),
            IndexError::Transport(_)
        ));
        assert!(matches!(
            fixtures.document_exists("orders", "1").await.unwrap_err(),
            IndexError::Transport(_)
        ));
    }
}

//! In-memory `IndexOperations` used by unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::errors::IndexError;
use crate::interfaces::IndexOperations;
use index_admin_shared::{Document, IndexCoordinates};

/// Settings the mock engine accepts, with their default values.
const KNOWN_SETTINGS: &[(&str, &str)] = &[
    ("index.number_of_shards", "1"),
    ("index.number_of_replicas", "1"),
    ("index.refresh_interval", "1s"),
    ("index.max_result_window", "10000"),
];

struct IndexState {
    settings: Document,
    mapping: Document,
}

/// Mock engine holding at most one index.
#[derive(Clone)]
pub(crate) struct InMemoryIndexOperations {
    coordinates: IndexCoordinates,
    state: Arc<Mutex<Option<IndexState>>>,
    unreachable: bool,
    pub(crate) calls: Arc<Mutex<Vec<&'static str>>>,
}

impl InMemoryIndexOperations {
    pub(crate) fn new(index: &str) -> Self {
        Self {
            coordinates: IndexCoordinates::of(index).unwrap(),
            state: Arc::new(Mutex::new(None)),
            unreachable: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A mock whose every call fails as if the node were down.
    pub(crate) fn unreachable(index: &str) -> Self {
        Self {
            unreachable: true,
            ..Self::new(index)
        }
    }

    async fn enter(&self, call: &'static str) -> Result<(), IndexError> {
        self.calls.lock().await.push(call);
        if self.unreachable {
            return Err(IndexError::transport("connection refused"));
        }
        Ok(())
    }

    fn missing(&self) -> IndexError {
        IndexError::not_found(format!("no such index [{}]", self.coordinates))
    }
}

fn normalize_settings(settings: &Document) -> Result<Document, IndexError> {
    let mut normalized = Document::new();
    for (key, value) in settings.flatten().iter() {
        let key = if key.starts_with("index.") {
            key.clone()
        } else {
            format!("index.{}", key)
        };
        if !KNOWN_SETTINGS.iter().any(|(known, _)| *known == key) {
            return Err(IndexError::invalid_argument(format!("unknown setting [{}]", key)));
        }
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        normalized.insert(key, value);
    }
    Ok(normalized)
}

#[async_trait]
impl IndexOperations for InMemoryIndexOperations {
    fn index_coordinates(&self) -> &IndexCoordinates {
        &self.coordinates
    }

    async fn create_index(&self, settings: Option<&Document>) -> Result<bool, IndexError> {
        self.enter("create_index").await?;
        let mut state = self.state.lock().await;
        if state.is_some() {
            return Err(IndexError::conflict(format!(
                "index [{}] already exists",
                self.coordinates
            )));
        }

        let mut stored = match settings {
            Some(settings) => normalize_settings(settings)?,
            None => Document::new(),
        };
        stored.insert("index.provided_name", self.coordinates.name());
        stored.insert("index.uuid", "mock-uuid");

        *state = Some(IndexState {
            settings: stored,
            mapping: Document::new(),
        });
        Ok(true)
    }

    async fn delete_index(&self) -> Result<bool, IndexError> {
        self.enter("delete_index").await?;
        Ok(self.state.lock().await.take().is_some())
    }

    async fn index_exists(&self) -> Result<bool, IndexError> {
        self.enter("index_exists").await?;
        Ok(self.state.lock().await.is_some())
    }

    async fn refresh_index(&self) -> Result<(), IndexError> {
        self.enter("refresh_index").await?;
        match *self.state.lock().await {
            Some(_) => Ok(()),
            None => Err(self.missing()),
        }
    }

    async fn put_mapping(&self, mapping: &Document) -> Result<bool, IndexError> {
        self.enter("put_mapping").await?;
        match self.state.lock().await.as_mut() {
            Some(state) => {
                state.mapping = mapping.clone();
                Ok(true)
            }
            None => Err(self.missing()),
        }
    }

    async fn get_mapping(&self) -> Result<Document, IndexError> {
        self.enter("get_mapping").await?;
        match self.state.lock().await.as_ref() {
            Some(state) => Ok(state.mapping.clone()),
            None => Err(self.missing()),
        }
    }

    async fn get_settings(&self, include_defaults: bool) -> Result<Document, IndexError> {
        self.enter("get_settings").await?;
        let state = self.state.lock().await;
        let Some(state) = state.as_ref() else {
            return Err(self.missing());
        };

        let mut settings = state.settings.clone();
        if include_defaults {
            let mut defaults = Document::new();
            for (key, value) in KNOWN_SETTINGS {
                defaults.insert(*key, *value);
            }
            settings.merge_missing(defaults);
        }
        Ok(settings)
    }
}

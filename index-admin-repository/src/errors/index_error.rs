//! Index administration error types.
//!
//! Remote failures are surfaced as-is: the engine's status code and error body
//! are classified into one variant and never recovered from locally.

use serde_json::Value;
use thiserror::Error;

use index_admin_shared::ModelError;

/// Engine error type reported when creating an index that already exists.
const ALREADY_EXISTS_TYPE: &str = "resource_already_exists_exception";

/// Engine error type reported when the target index is missing.
const INDEX_NOT_FOUND_TYPE: &str = "index_not_found_exception";

/// Errors that can occur during index administration.
#[derive(Debug, Clone, Error)]
pub enum IndexError {
    /// The target index state already exists (e.g. duplicate create).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The target index or document does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A payload or name was rejected, locally or by the engine.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The engine could not be reached or the request timed out.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The engine answered with an unexpected status or an unreadable body.
    #[error("Unexpected response (status {status}): {reason}")]
    Response { status: u16, reason: String },
}

impl IndexError {
    /// Create a conflict error.
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an unexpected response error.
    pub fn response(status: u16, reason: impl Into<String>) -> Self {
        Self::Response {
            status,
            reason: reason.into(),
        }
    }

    /// Classify a non-success engine response.
    ///
    /// `body` is the raw response text; it may be empty (HEAD requests) or
    /// not JSON at all (proxies), in which case the status alone decides.
    pub fn from_response(status: u16, body: &str) -> Self {
        let (error_type, reason) = parse_error_body(body);
        let reason = reason.unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("status {}", status)
            } else {
                body.to_string()
            }
        });

        match (status, error_type.as_deref()) {
            (_, Some(ALREADY_EXISTS_TYPE)) | (409, _) => Self::Conflict(reason),
            (_, Some(INDEX_NOT_FOUND_TYPE)) | (404, _) => Self::NotFound(reason),
            (400, _) => Self::InvalidArgument(reason),
            _ => Self::Response { status, reason },
        }
    }

    /// Whether this error means the target does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this error means the target already exists.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<ModelError> for IndexError {
    fn from(err: ModelError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

/// Extract `error.type` and `error.reason` from an engine error body.
fn parse_error_body(body: &str) -> (Option<String>, Option<String>) {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return (None, None);
    };

    match value.get("error") {
        Some(Value::Object(error)) => {
            let error_type = error
                .get("type")
                .and_then(Value::as_str)
                .map(str::to_string);
            let reason = error
                .get("reason")
                .and_then(Value::as_str)
                .map(str::to_string);
            (error_type, reason)
        }
        Some(Value::String(reason)) => (None, Some(reason.clone())),
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_is_conflict() {
        let body = r#"{
            "error": {
                "root_cause": [{"type": "resource_already_exists_exception", "reason": "index [orders/abc] already exists"}],
                "type": "resource_already_exists_exception",
                "reason": "index [orders/abc] already exists",
                "index": "orders"
            },
            "status": 400
        }"#;

        let err = IndexError::from_response(400, body);
        assert!(err.is_conflict());
        assert_eq!(
            err.to_string(),
            "Conflict: index [orders/abc] already exists"
        );
    }

    #[test]
    fn test_409_is_conflict() {
        assert!(IndexError::from_response(409, "").is_conflict());
    }

    #[test]
    fn test_index_not_found() {
        let body = r#"{"error":{"type":"index_not_found_exception","reason":"no such index [orders]"},"status":404}"#;
        let err = IndexError::from_response(404, body);
        assert!(err.is_not_found());

        // HEAD responses carry no body
        assert!(IndexError::from_response(404, "").is_not_found());
    }

    #[test]
    fn test_bad_request_is_invalid_argument() {
        let body = r#"{"error":{"type":"illegal_argument_exception","reason":"unknown setting [index.bogus]"},"status":400}"#;
        let err = IndexError::from_response(400, body);
        assert!(matches!(err, IndexError::InvalidArgument(ref r) if r == "unknown setting [index.bogus]"));
    }

    #[test]
    fn test_server_error_keeps_status() {
        let err = IndexError::from_response(503, "upstream unavailable");
        assert!(matches!(
            err,
            IndexError::Response { status: 503, ref reason } if reason == "upstream unavailable"
        ));

        let err = IndexError::from_response(500, "");
        assert!(matches!(err, IndexError::Response { status: 500, ref reason } if reason == "status 500"));
    }

    #[test]
    fn test_string_error_body() {
        let err = IndexError::from_response(400, r#"{"error":"bad mapping","status":400}"#);
        assert!(matches!(err, IndexError::InvalidArgument(ref r) if r == "bad mapping"));
    }

    #[test]
    fn test_model_error_is_invalid_argument() {
        let err: IndexError = ModelError::invalid_schema("duplicate field 'id'").into();
        assert!(matches!(err, IndexError::InvalidArgument(_)));
    }
}

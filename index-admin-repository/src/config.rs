//! Configuration types for connecting to the search engine.

use std::env;
use std::time::Duration;

use crate::errors::IndexError;

/// Default engine URL.
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-request timeout used by test fixtures.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Connection settings for the search engine.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Engine base URL, e.g. `http://localhost:9200`.
    pub url: String,
    /// Basic auth user name.
    pub username: Option<String>,
    /// Basic auth password. Ignored without a user name.
    pub password: Option<String>,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: engine URL (default: http://localhost:9200)
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: basic auth credentials
    /// - `OPENSEARCH_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, IndexError> {
        let url = env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let username = env::var("OPENSEARCH_USERNAME").ok().filter(|u| !u.is_empty());
        let password = env::var("OPENSEARCH_PASSWORD").ok();

        let timeout = match env::var("OPENSEARCH_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            url,
            username,
            password,
            timeout,
        })
    }

    /// Configuration for test fixtures: local engine, short timeout.
    ///
    /// `OPENSEARCH_TEST_URL` overrides the local default.
    pub fn for_tests() -> Self {
        Self {
            url: env::var("OPENSEARCH_TEST_URL").unwrap_or_else(|_| DEFAULT_URL.to_string()),
            timeout: TEST_TIMEOUT,
            ..Self::default()
        }
    }

    /// Use a different engine URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Authenticate with basic auth.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Use a different request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_timeout_secs(raw: &str) -> Result<Duration, IndexError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        IndexError::invalid_argument(format!("OPENSEARCH_TIMEOUT_SECS is not a number: {}", raw))
    })?;
    if secs == 0 {
        return Err(IndexError::invalid_argument(
            "OPENSEARCH_TIMEOUT_SECS must be greater than zero",
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "http://localhost:9200");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.username.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::default()
            .with_url("https://search.internal:9200")
            .with_credentials("admin", "secret")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.url, "https://search.internal:9200");
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_for_tests_uses_short_timeout() {
        assert_eq!(ClientConfig::for_tests().timeout, TEST_TIMEOUT);
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("10").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_timeout_secs(" 7 ").unwrap(), Duration::from_secs(7));
        assert!(parse_timeout_secs("0").is_err());
        assert!(parse_timeout_secs("soon").is_err());
    }
}

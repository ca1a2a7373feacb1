//! HTTP transport for market documents.

use async_trait::async_trait;
use bytes::Bytes;
use dayahead_types::DayaheadError;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Longest response body excerpt kept in a status error.
const BODY_EXCERPT_CHARS: usize = 512;

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout (separate from request timeout).
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("dayahead/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while fetching a document.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Start of the response body; the API explains rejections there.
        body: String,
    },
}

impl TransportError {
    /// Returns the HTTP status code, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
        }
    }
}

impl From<TransportError> for DayaheadError {
    fn from(err: TransportError) -> Self {
        Self::Transport {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

/// Fetches raw document bytes from a fully formed URL.
///
/// Implementations fail on network errors and on any non-success status.
/// They do not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches the body at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or non-success status.
    async fn fetch(&self, url: &str) -> Result<Bytes, TransportError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Creates a new transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a transport with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<Bytes, TransportError> {
        // The URL carries the security token, keep it out of error messages.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.trim().chars().take(BODY_EXCERPT_CHARS).collect(),
            });
        }

        Ok(response.bytes().await.map_err(reqwest::Error::without_url)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("dayahead/"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let transport = HttpTransport::with_defaults();
        assert!(transport.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api").query_param("documentType", "A44");
                then.status(200).body("<Publication_MarketDocument/>");
            })
            .await;

        let transport = HttpTransport::with_defaults().unwrap();
        let body = transport
            .fetch(&server.url("/api?documentType=A44"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(&body[..], b"<Publication_MarketDocument/>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api");
                then.status(401).body("Unauthorized");
            })
            .await;

        let transport = HttpTransport::with_defaults().unwrap();
        let err = transport.fetch(&server.url("/api")).await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(matches!(err, TransportError::Status { ref body, .. } if body == "Unauthorized"));

        let err: DayaheadError = err.into();
        assert!(err.is_transport());
    }
}

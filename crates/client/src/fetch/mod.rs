//! HTTP document retrieval.
//!
//! [`FetchClient`] issues plain GETs against the encyclopedia origin:
//! redirects are followed, the body is accumulated in full, and the response
//! is handed back as text. HTTP status codes are not treated as failures;
//! whether a concept exists is decided from page structure by the caller.
//! Transport failures surface as [`Error::Network`]. No retries, and no
//! cache of its own: caching is entirely the caller's responsibility.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

use unionpedia_core::Error;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "unionpedia-client/0.1")
    pub user_agent: String,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "unionpedia-client/0.1".to_string(),
            timeout: Duration::from_millis(20000),
            max_redirects: 5,
        }
    }
}

/// Source of raw HTML pages.
///
/// The resolver depends on this trait rather than on [`FetchClient`]
/// directly, so the transport can be swapped or scripted in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Retrieve the page at `url` as text.
    async fn fetch(&self, url: &str) -> Result<String, Error>;
}

/// HTTP fetch client over reqwest.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl PageFetcher for FetchClient {
    async fn fetch(&self, url: &str) -> Result<String, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(|e| Error::Network(format!("network error: {}", e)))?;

        let status = response.status();
        let final_url = response.url().clone();

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("failed to read response: {}", e)))?;

        tracing::debug!(
            "fetched {} -> {} ({}, {} bytes) in {}ms",
            url,
            final_url,
            status,
            body.len(),
            start.elapsed().as_millis()
        );

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "unionpedia-client/0.1");
        assert_eq!(config.timeout, Duration::from_millis(20000));
        assert_eq!(config.max_redirects, 5);
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        let config = FetchConfig::default();
        let client = FetchClient::new(config);
        assert!(client.is_ok());
    }
}

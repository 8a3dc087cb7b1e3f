//! HTTP client for fetching pages

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Too many redirects")]
    TooManyRedirects,
}

pub type Result<T> = std::result::Result<T, DownloadError>;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_redirects: 10,
            user_agent: concat!("pagefetch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Response reduced to what classification and persistence need
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: StatusCode,
    /// Raw `Content-Type` header value, if the server declared one
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Source of page responses
///
/// One call is one GET with no retry. Implementations must report transport
/// failures as errors rather than panicking.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchedResponse>;
}

/// reqwest-backed page fetcher
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| DownloadError::RequestFailed(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageSource for HttpClient {
    async fn get(&self, url: &str) -> Result<FetchedResponse> {
        debug!(url, "Starting download");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::Timeout
            } else if e.is_redirect() {
                DownloadError::TooManyRedirects
            } else if e.is_builder() {
                DownloadError::InvalidUrl(url.to_string())
            } else {
                DownloadError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::Timeout
            } else {
                DownloadError::RequestFailed(format!("Failed to read body: {}", e))
            }
        })?;

        debug!(url, status = status.as_u16(), size = body.len(), "Download completed");

        Ok(FetchedResponse {
            status,
            content_type,
            body,
        })
    }
}

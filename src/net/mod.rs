//! Network utilities for talking to the remote catalog.
//!
//! This module provides the networking infrastructure for pustaka:
//!
//! - **Configuration**: [`ClientConfig`], built with the generated [`ClientConfigBuilder`]
//! - **HTTP Client**: [`HttpClient`], a thin JSON-over-HTTP wrapper with a fixed timeout
//! - **Error Rendering**: transport failures are turned into user-facing messages here,
//!   before they reach [`classify`](crate::error::classify)
//! - **JSON Lookup**: alias-aware field access in [`json`]
//!
//! The client does not retry. A failed request is retried by the caller
//! re-issuing it (see [`BookSearch::retry`](crate::search::BookSearch::retry)).
//!
//! # Examples
//!
//! ```rust
//! use pustaka::net::{ClientConfigBuilder, HttpClient};
//! use std::time::Duration;
//!
//! # async fn example() -> pustaka::Result<()> {
//! let config = ClientConfigBuilder::default()
//!     .base_url("https://catalog.example/api/v1")
//!     .timeout(Duration::from_secs(5))
//!     .build()
//!     .unwrap();
//!
//! let client = HttpClient::new(config)?;
//! let stats: serde_json::Value = client.get_json("/stats/genre", &[]).await?;
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use derive_builder::Builder;
use reqwest::{Client, header::HeaderMap};
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::error::{Error, Result, TransportKind};

pub mod json;

/// Base URL of the public BukuAcak catalog.
pub const DEFAULT_BASE_URL: &str = "https://bukuacak-9bdcb4ef2605.herokuapp.com/api/v1";

/// Client-side request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`HttpClient`].
///
/// ```rust
/// use pustaka::net::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
///
/// let config = ClientConfig::default();
/// assert_eq!(config.base_url, DEFAULT_BASE_URL);
/// assert_eq!(config.timeout, DEFAULT_TIMEOUT);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into), default)]
pub struct ClientConfig {
    /// Root of the catalog API, without a trailing slash
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("pustaka/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client bound to one catalog base URL.
///
/// Every failure is mapped before it leaves the client:
///
/// | Condition | Error |
/// |-----------|-------|
/// | HTTP 404 | [`TransportKind::NotFound`] |
/// | HTTP 5xx | [`TransportKind::Server`] |
/// | Timeout | [`TransportKind::Timeout`] |
/// | No response | [`TransportKind::Connection`] |
/// | Other status, body has a `message` | [`Error::Status`] with the JSON body |
/// | Other status, no `message` | [`TransportKind::Connection`] |
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpClient {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// * [`Error::Parse`] - If the base URL is not a valid URL
    /// * [`Error::Network`] - If the underlying client cannot be built
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| Error::parse(format!("Invalid base URL {}: {}", config.base_url, e)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: HeaderMap::new(),
        }
        .with_header("Accept", "application/json"))
    }

    /// Adds a header sent with every request. Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            name.parse::<reqwest::header::HeaderName>(),
            value.parse::<reqwest::header::HeaderValue>(),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `path` against the base URL and appends `query`.
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url =
            Url::parse(&raw).map_err(|e| Error::parse(format!("Invalid URL {}: {}", raw, e)))?;

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    /// Performs a GET request and returns the response body.
    ///
    /// Issues exactly one request; see the type-level docs for error mapping.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Bytes> {
        let url = self.url(path, query)?;
        debug!(%url, "API request: GET");

        let response = match self
            .client
            .get(url.clone())
            .headers(self.headers.clone())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(%url, error = %e, "Request error");
                return Err(transport_failure(&e));
            }
        };

        let status = response.status();
        debug!(%url, status = status.as_u16(), "API response");

        if status.is_success() {
            return response.bytes().await.map_err(|e| {
                if e.is_timeout() {
                    Error::transport(TransportKind::Timeout)
                } else {
                    Error::Network(e)
                }
            });
        }

        // an unreadable error body is treated as empty
        let body = response.bytes().await.unwrap_or_default();
        error!(%url, status = status.as_u16(), body = %String::from_utf8_lossy(&body), "Response error");

        Err(status_failure(status, &body))
    }

    /// Performs a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// * All errors from [`get()`](HttpClient::get)
    /// * [`Error::Json`] - If the body is not the expected JSON
    pub async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let bytes = self.get(path, query).await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }
}

/// Maps a non-success response to an error.
///
/// Statuses other than 404 and 5xx keep their body only when it carries a
/// server `message`; otherwise they read as a failed fetch.
fn status_failure(status: reqwest::StatusCode, body: &[u8]) -> Error {
    if status == reqwest::StatusCode::NOT_FOUND {
        return Error::transport(TransportKind::NotFound);
    }
    if status.is_server_error() {
        return Error::transport(TransportKind::Server);
    }

    let error = Error::status(status.as_u16(), serde_json::from_slice(body).ok());
    if error.response_message().is_some() {
        error
    } else {
        Error::transport(TransportKind::Connection)
    }
}

fn transport_failure(e: &reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::transport(TransportKind::Timeout)
    } else {
        Error::transport(TransportKind::Connection)
    }
}

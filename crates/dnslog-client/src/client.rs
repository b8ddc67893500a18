//! Main data service client implementation.

use crate::api::DataApi;
use crate::config::{ClientConfig, DEFAULT_API_HOST, DEFAULT_TIMEOUT};
use dnslog_core::{DnsLogError, Result, ServiceIndex};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the DNS log data service
#[derive(Clone)]
pub struct DnsLogClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: String,
    timeout: Duration,
}

impl DnsLogClient {
    /// Create a client for the given base URL using default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        DnsLogClientBuilder::new().base_url(base_url).build()
    }

    /// Create a client from a [`ClientConfig`]
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        DnsLogClientBuilder::new()
            .base_url(config.api_host.clone())
            .timeout(config.timeout)
            .build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> DnsLogClientBuilder {
        DnsLogClientBuilder::new()
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Access the data query endpoints
    #[must_use]
    pub const fn data(&self) -> DataApi<'_> {
        DataApi::new(self)
    }

    /// Fetch the service index
    pub async fn index(&self) -> Result<ServiceIndex> {
        self.get("/").await
    }

    /// Perform a GET request
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Perform a POST request with JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path);
        debug!(url = %url, "POST request");

        let response = self
            .inner
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        self.handle_response(response).await
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    fn map_transport_error(&self, err: &reqwest::Error) -> DnsLogError {
        if err.is_timeout() {
            DnsLogError::Timeout(self.inner.timeout.as_secs())
        } else if err.is_connect() {
            DnsLogError::Connection(err.to_string())
        } else {
            DnsLogError::Http(err.to_string())
        }
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(DnsLogError::Json)
        } else {
            Err(Self::error_from_body(status.as_u16(), body))
        }
    }

    /// Convert an error response to a [`DnsLogError`]
    fn error_from_body(status: u16, body: String) -> DnsLogError {
        // Try to parse error message from JSON
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("detail")
                    .or_else(|| v.get("error"))
                    .map(|d| d.as_str().map_or_else(|| d.to_string(), String::from))
            })
            .unwrap_or(body);

        warn!(status, message = %message, "data service returned an error");
        DnsLogError::Api {
            code: status,
            message,
        }
    }
}

/// Builder for configuring a [`DnsLogClient`]
pub struct DnsLogClientBuilder {
    base_url: String,
    timeout: Duration,
}

impl Default for DnsLogClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsLogClientBuilder {
    /// Create a new builder pointing at the default host
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_HOST.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client, validating the base URL
    pub fn build(self) -> Result<DnsLogClient> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| DnsLogError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DnsLogError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                self.base_url
            )));
        }

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(concat!("dnslog-client/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .map_err(|e| DnsLogError::Http(e.to_string()))?;

        Ok(DnsLogClient {
            inner: Arc::new(ClientInner {
                http,
                base_url: self.base_url.trim_end_matches('/').to_string(),
                timeout: self.timeout,
            }),
        })
    }
}

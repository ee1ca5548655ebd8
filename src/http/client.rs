//! HTTP client used by every Baserow operation
//!
//! Wraps `reqwest` with:
//! - URL composition against the API base URL (absolute URLs pass through)
//! - Default and per-request headers, query parameters and JSON bodies
//! - Status classification into transport, API and protocol errors
//! - Optional retries with backoff and optional rate limiting, both off by
//!   default so every operation issues exactly one request

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::types::{BackoffType, Outcome};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative request paths
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 0,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("baserow-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// HTTP client with optional retry and rate limiting
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.request(Method::GET, url, RequestConfig::default())
            .await
    }

    /// Make a GET request with config
    pub async fn get_with_config(&self, url: &str, config: RequestConfig) -> Result<Response> {
        self.request(Method::GET, url, config).await
    }

    /// Send a request, retrying transient failures, and return the response
    /// whatever its final status
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let full_url = self.build_url(url);
        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let mut req = self.client.request(method.clone(), &full_url);

            for (key, value) in &self.config.default_headers {
                req = req.header(key.as_str(), value.as_str());
            }

            for (key, value) in &config.headers {
                req = req.header(key.as_str(), value.as_str());
            }

            if !config.query.is_empty() {
                req = req.query(&config.query);
            }

            if let Some(ref body) = config.body {
                req = req.json(body);
            }

            debug!("{} {}", method, full_url);

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = extract_retry_after(&response);
                        if attempt < max_retries {
                            warn!(
                                "Rate limited (429), attempt {}/{}, waiting {}s",
                                attempt + 1,
                                max_retries + 1,
                                retry_after
                            );
                            tokio::time::sleep(Duration::from_secs(retry_after)).await;
                            attempt += 1;
                            continue;
                        }
                        if max_retries > 0 {
                            return Err(Error::RateLimited {
                                retry_after_seconds: retry_after,
                            });
                        }
                        return Ok(response);
                    }

                    if is_retryable_status(status) && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Ok(response);
                }
                Err(e) => {
                    if (e.is_timeout() || e.is_connect()) && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Transport error ({}), attempt {}/{}, retrying in {:?}",
                            e,
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(Error::Transport(e));
                }
            }
        }
    }

    /// Make a request, turning any non-success status into [`Error::Api`]
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let response = self.execute(method, url, config).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(status.as_u16(), body));
        }
        Ok(response)
    }

    /// Make a request and parse the JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.request(method, url, config).await?;
        parse_json_body(response).await
    }

    /// Make a GET request and parse JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.request_json(Method::GET, url, RequestConfig::default())
            .await
    }

    /// Make a GET request with config and parse JSON response
    pub async fn get_json_with_config<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        self.request_json(Method::GET, url, config).await
    }

    /// Make a request and report a non-success status as
    /// [`Outcome::Rejected`] instead of an error
    pub async fn outcome(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Outcome<Response>> {
        let response = self.execute(method, url, config).await?;
        let status = response.status();
        if status.is_success() {
            Ok(Outcome::Applied(response))
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!("{} rejected with status {}", url, status.as_u16());
            Ok(Outcome::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Like [`HttpClient::outcome`], parsing the body of an applied mutation
    pub async fn outcome_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Outcome<T>> {
        match self.outcome(method, url, config).await? {
            Outcome::Applied(response) => Ok(Outcome::Applied(parse_json_body(response).await?)),
            Outcome::Rejected { status, body } => Ok(Outcome::Rejected { status, body }),
        }
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Build full URL from path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff * factor
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("max_retries", &self.config.max_retries)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Decode a 2xx body; a body that is not the expected JSON is a protocol
/// violation rather than an API error
async fn parse_json_body<T: DeserializeOwned>(response: Response) -> Result<T> {
    let url = response.url().to_string();
    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| Error::protocol(format!("unexpected response body from {url}: {e}")))
}

/// Check if an HTTP status is retryable
fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}

/// Extract retry-after header value
fn extract_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(60)
}

//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with browser-like headers and a hard timeout
//! - Classifying failed attempts (status, timeout, transport)
//! - Retrying with exponential backoff until the attempt budget runs out
//!
//! The network itself sits behind the `Transport` trait so the retry policy
//! can be driven by a fake transport under a paused clock.

use crate::config::FetchConfig;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

/// A single GET attempt against the network
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url` once, returning the body of a 2xx response
    async fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// The timeout covers the whole attempt, from connecting until the body has
/// been read.
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client (e.g. invalid user agent)
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
    );

    Client::builder()
        .user_agent(config.user_agent())
        .default_headers(headers)
        .timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// `Transport` backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify_error(url, e))
    }
}

/// Classify reqwest error
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Attempt budget and backoff schedule for one request
///
/// | Attempt fails | Wait before next |
/// |---------------|------------------|
/// | 1             | `base_delay`     |
/// | 2             | `2 * base_delay` |
/// | n < attempts  | `2^(n-1) * base_delay` |
/// | last          | none, give up    |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy; at least one attempt is always made
    pub fn new(attempts: u32, base_delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            base_delay,
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(config.retry, config.retry_delay())
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Delay to wait after attempt number `attempt` (1-based) has failed
    ///
    /// Returns `None` once the budget is spent.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt >= self.attempts {
            return None;
        }
        let factor = 2u32.saturating_pow(attempt - 1);
        Some(self.base_delay.saturating_mul(factor))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Fetches pages through a `Transport`, absorbing transient failures
#[derive(Debug, Clone)]
pub struct Fetcher<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetches `url`, retrying with exponential backoff
    ///
    /// Never fails: every failed attempt is logged, and an exhausted budget
    /// comes back as `None`.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        let attempts = self.policy.attempts();

        for attempt in 1..=attempts {
            match self.transport.get(url).await {
                Ok(body) => {
                    if attempt > 1 {
                        tracing::info!("Fetched {} on attempt {}/{}", url, attempt, attempts);
                    }
                    return Some(body);
                }
                Err(e) => {
                    tracing::warn!("Fetch attempt {}/{} failed: {}", attempt, attempts, e);
                    if let Some(delay) = self.policy.delay_after(attempt) {
                        tracing::debug!("Retrying {} in {:?}", url, delay);
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        tracing::error!("Giving up on {} after {} attempts", url, attempts);
        None
    }
}

impl Fetcher<HttpTransport> {
    /// Builds an HTTP-backed fetcher from the fetch configuration
    pub fn from_config(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(
            HttpTransport::from_config(config)?,
            RetryPolicy::from_config(config),
        ))
    }
}

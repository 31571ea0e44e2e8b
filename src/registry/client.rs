//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Opt-in exponential backoff retry logic (off by default)
//! - Rate limit and 404 error mapping

use crate::error::RegistryError;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("nuget-updater/", env!("CARGO_PKG_VERSION"));

/// Transport failures abort the run unless retries are configured
pub const DEFAULT_MAX_RETRIES: u32 = 0;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// Upper bound on the backoff between retries
const MAX_DELAY_MS: u64 = 30_000;

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request with retry logic and error context
    pub async fn get_with_context(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<reqwest::Response, RegistryError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            tracing::debug!(url, attempt, "GET");
            match self.client.get(url).send().await {
                Ok(response) => {
                    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(RegistryError::RateLimitExceeded {
                            registry: registry.to_string(),
                        });

                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(delay)).await;
                            delay = next_delay(delay);
                            continue;
                        }
                        break;
                    }

                    if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(RegistryError::package_not_found(package, registry));
                    }

                    if !response.status().is_success() {
                        let status = response.status();
                        return Err(RegistryError::network_error(
                            package,
                            registry,
                            format!("HTTP {}", status),
                        ));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(RegistryError::timeout(package, registry));
                    } else {
                        last_error = Some(RegistryError::network_error(
                            package,
                            registry,
                            e.to_string(),
                        ));
                    }

                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay = next_delay(delay);
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            RegistryError::network_error(package, registry, "unknown error")
        }))
    }

    /// Perform a GET request and parse the JSON body
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get_with_context(url, package, registry).await?;
        response.json::<T>().await.map_err(|e| {
            RegistryError::invalid_response(
                package,
                registry,
                format!("failed to parse JSON: {}", e),
            )
        })
    }
}

/// Doubled backoff, capped at `MAX_DELAY_MS`
fn next_delay(delay: u64) -> u64 {
    delay.saturating_mul(2).min(MAX_DELAY_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_with_config() {
        let client = HttpClient::with_config(Duration::from_secs(60), "test-agent/1.0");
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_no_retries_by_default() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.max_retries, 0);
    }

    #[test]
    fn test_http_client_with_max_retries() {
        let client = HttpClient::new().unwrap().with_max_retries(5);
        assert_eq!(client.max_retries, 5);
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(30));
        assert!(DEFAULT_USER_AGENT.starts_with("nuget-updater/"));
        assert_eq!(BASE_DELAY_MS, 100);
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(next_delay(BASE_DELAY_MS), 200);
        assert_eq!(next_delay(20_000), MAX_DELAY_MS);

        let mut delay = BASE_DELAY_MS;
        for _ in 0..100 {
            delay = next_delay(delay);
        }
        assert_eq!(delay, MAX_DELAY_MS);
        assert_eq!(next_delay(u64::MAX), MAX_DELAY_MS);
    }

    #[tokio::test]
    async fn test_get_maps_404_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/missing", server.url());
        let err = client
            .get_with_context(&url, "Missing", "test")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_maps_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/boom")
            .with_status(500)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/boom", server.url());
        let err = client.get_with_context(&url, "Boom", "test").await.unwrap_err();
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_get_json_invalid_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/bad")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/bad", server.url());
        let err = client
            .get_json::<serde_json::Value>(&url, "Bad", "test")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_rate_limit_retries_then_fails() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/limited")
            .with_status(429)
            .expect(2)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap().with_max_retries(1);
        let url = format!("{}/limited", server.url());
        let err = client
            .get_with_context(&url, "Limited", "test")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::RateLimitExceeded { .. }));
        m.assert_async().await;
    }
}

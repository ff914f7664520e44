//! HTTP client creation and configuration utilities

use crate::constants::{HTTP_POOL_MAX_IDLE_PER_HOST, upstream};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

/// Header identifying the caller as the official mobile app.
pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";

/// Headers sent with every upstream request.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(REQUESTED_WITH_HEADER),
        HeaderValue::from_static(upstream::REQUESTED_WITH),
    );
    headers
}

/// Creates a configured HTTP client with connection pooling and timeout handling.
///
/// # Features
/// * Configurable timeout for requests (default: 30 seconds, configurable via config/env)
/// * Connection pooling with centralized pool size configuration
/// * Fixed `Accept` and `X-Requested-With` headers on every request
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE_PER_HOST)
        .default_headers(default_headers())
        .build()
}

/// Creates an HTTP client for testing with default timeout
#[cfg(test)]
pub fn create_test_http_client() -> Client {
    create_http_client_with_timeout(crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS)
        .expect("Failed to create test HTTP client")
}

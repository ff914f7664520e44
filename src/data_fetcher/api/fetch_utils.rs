//! Generic HTTP fetching with response caching, base URL fallback and error mapping

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::urls::build_url;
use crate::data_fetcher::cache::TtlCache;
use crate::error::AppError;

/// Fetches a JSON document, trying each base URL in order.
///
/// This function:
/// - Checks the response cache first (keyed by the relative `path`, shared by all bases)
/// - Accepts the first 2xx response whose content type is JSON and whose body parses
/// - Caches the raw body of that response for `ttl`
///
/// # Returns
/// * `Ok(Value)` - Parsed JSON document
/// * `Err(AppError::UpstreamExhausted)` - Every base URL failed
#[instrument(skip(client, base_urls, cache))]
pub(super) async fn fetch_json(
    client: &Client,
    base_urls: &[String],
    path: &str,
    cache: &TtlCache<String>,
    ttl: Duration,
) -> Result<Value, AppError> {
    let cache_key = path.to_string();
    if let Some(cached) = cache.get(&cache_key).await {
        match serde_json::from_str::<Value>(&cached) {
            Ok(value) => {
                debug!("Using cached response for {path}");
                return Ok(value);
            }
            Err(e) => {
                // Continue with fresh request if cached response is invalid
                warn!("Failed to parse cached response for {path}: {e}");
                cache.remove(&cache_key).await;
            }
        }
    }

    for base_url in base_urls {
        let url = build_url(base_url, path);
        match fetch_once(client, &url).await {
            Ok((value, body)) => {
                info!("Fetched {url}");
                cache.set_with_ttl(cache_key, body, ttl).await;
                return Ok(value);
            }
            Err(e) if e.is_retryable() => {
                warn!("Upstream request failed, trying next base URL: {e}");
            }
            Err(e) => {
                // Still worth asking the other base, it may be a different deployment
                info!("Upstream rejected request, trying next base URL: {e}");
            }
        }
    }

    Err(AppError::upstream_exhausted(path))
}

/// Performs a single GET and validates status, content type and body.
///
/// Returns the parsed document and the raw body for caching.
async fn fetch_once(client: &Client, url: &str) -> Result<(Value, String), AppError> {
    debug!("Requesting {url}");

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            AppError::network_timeout(url)
        } else if e.is_connect() {
            AppError::network_connection(url, e.to_string())
        } else {
            AppError::ApiFetch(e)
        }
    })?;

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        return Err(match status_code {
            404 => AppError::api_not_found(url),
            429 => AppError::api_rate_limit(reason, url),
            400..=499 => AppError::api_client_error(status_code, reason, url),
            502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
            _ => AppError::api_server_error(status_code, reason, url),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.contains("application/json") {
        return Err(AppError::api_non_json(content_type, url));
    }

    let body = response.text().await?;
    debug!("Response length: {} bytes", body.len());

    if body.trim().is_empty() {
        return Err(AppError::api_no_data("Response body is empty", url));
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(value) => Ok((value, body)),
        Err(e) => {
            let preview: String = body.chars().take(200).collect();
            debug!("Unparseable response (first 200 chars): {preview}");
            Err(AppError::api_malformed_json(e.to_string(), url))
        }
    }
}

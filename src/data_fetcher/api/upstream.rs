//! Typed access to the Playtomic endpoints.
//!
//! The plain `fetch_*` operations swallow upstream failures: the caller gets
//! an empty list and the failure is logged. The `try_fetch_*` variants report
//! the failure instead, for callers that must tell "nothing" from "unknown".

use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::fetch_utils::fetch_json;
use super::http_client::create_http_client_with_timeout;
use super::urls::{build_availability_path, build_resources_path, build_tenants_path};
use crate::config::Config;
use crate::constants::cache_ttl;
use crate::data_fetcher::cache::TtlCache;
use crate::data_fetcher::models::{
    AvailabilitySlot, ParseError, Region, Resource, Tenant, listing_items,
};
use crate::error::AppError;

/// HTTP client for the upstream API, with its raw response cache.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_urls: Arc<Vec<String>>,
    search_radius_meters: u32,
    responses: Arc<TtlCache<String>>,
}

impl UpstreamClient {
    pub fn new(
        client: Client,
        base_urls: Vec<String>,
        search_radius_meters: u32,
        responses: Arc<TtlCache<String>>,
    ) -> Self {
        Self {
            client,
            base_urls: Arc::new(base_urls),
            search_radius_meters,
            responses,
        }
    }

    /// Builds a client from configuration with a fresh response cache.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(
            client,
            config.base_urls(),
            config.search_radius_meters,
            Arc::new(TtlCache::new("responses")),
        ))
    }

    /// Raw response cache, exposed for health reporting.
    pub fn response_cache(&self) -> &Arc<TtlCache<String>> {
        &self.responses
    }

    /// Clubs around a region's reference point. Failures give an empty list.
    pub async fn fetch_tenants(&self, region: Region) -> Vec<Tenant> {
        self.try_fetch_tenants(region)
            .await
            .unwrap_or_else(|e| no_data("tenants", e))
    }

    /// Availability of a club's courts for one date, normalized to Bali time.
    /// Failures give an empty list.
    pub async fn fetch_availability(&self, tenant_id: &str, date: &str) -> Vec<AvailabilitySlot> {
        self.try_fetch_availability(tenant_id, date)
            .await
            .unwrap_or_else(|e| no_data("availability", e))
    }

    /// Courts of a club, used for court names. Failures give an empty list.
    pub async fn fetch_resources(&self, tenant_id: &str) -> Vec<Resource> {
        self.try_fetch_resources(tenant_id)
            .await
            .unwrap_or_else(|e| no_data("resources", e))
    }

    /// Like [`fetch_tenants`](Self::fetch_tenants), but reports upstream failures.
    #[instrument(skip(self))]
    pub async fn try_fetch_tenants(&self, region: Region) -> Result<Vec<Tenant>, AppError> {
        let path = build_tenants_path(region, self.search_radius_meters);
        let value = self.get(&path, cache_ttl::TENANTS_SECONDS).await?;

        let tenants = parse_items(listing_items(value, false), "tenant");
        debug!("Found {} tenants for {region}", tenants.len());
        Ok(tenants)
    }

    /// Like [`fetch_availability`](Self::fetch_availability), but reports upstream failures.
    #[instrument(skip(self))]
    pub async fn try_fetch_availability(
        &self,
        tenant_id: &str,
        date: &str,
    ) -> Result<Vec<AvailabilitySlot>, AppError> {
        let path = build_availability_path(tenant_id, date);
        let value = self.get(&path, cache_ttl::AVAILABILITY_SECONDS).await?;

        // Only a bare array is a valid availability listing
        match value {
            Value::Array(items) => Ok(parse_items(items, "availability")),
            other => {
                let kind = if other.is_object() { "object" } else { "scalar" };
                Err(AppError::api_unexpected_structure(
                    format!("expected an array, got an {kind}"),
                    path,
                ))
            }
        }
    }

    /// Like [`fetch_resources`](Self::fetch_resources), but reports upstream failures.
    #[instrument(skip(self))]
    pub async fn try_fetch_resources(&self, tenant_id: &str) -> Result<Vec<Resource>, AppError> {
        let path = build_resources_path(tenant_id);
        let value = self.get(&path, cache_ttl::RESOURCES_SECONDS).await?;
        Ok(parse_items(listing_items(value, true), "resource"))
    }

    async fn get(&self, path: &str, ttl_seconds: u64) -> Result<Value, AppError> {
        fetch_json(
            &self.client,
            &self.base_urls,
            path,
            &self.responses,
            Duration::from_secs(ttl_seconds),
        )
        .await
    }
}

fn no_data<T>(endpoint: &str, error: AppError) -> Vec<T> {
    warn!("Returning no {endpoint}: {error}");
    Vec::new()
}

/// Parses each item, logging and skipping the ones that do not fit.
fn parse_items<T>(items: Vec<Value>, entity: &str) -> Vec<T>
where
    T: TryFrom<Value, Error = ParseError>,
{
    items
        .into_iter()
        .filter_map(|item| match T::try_from(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Skipping {entity} item: {e}");
                None
            }
        })
        .collect()
}

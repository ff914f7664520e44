//! URL building utilities for upstream endpoints
//!
//! Paths are built relative to a base URL so the same path (and cache key)
//! can be tried against the primary and the fallback base.

use crate::constants::upstream::{SPORT_ID, TENANT_PAGE_SIZE};
use crate::data_fetcher::models::Region;

/// Builds the tenant search path for a region.
///
/// # Example
/// ```
/// use padel_slots::data_fetcher::api::build_tenants_path;
/// use padel_slots::data_fetcher::models::Region;
///
/// let path = build_tenants_path(Region::Ubud, 8000);
/// assert_eq!(
///     path,
///     "/tenants?coordinate=-8.506,115.262&radius=8000&sport_id=PADEL&playtomic_status=ACTIVE&size=500"
/// );
/// ```
pub fn build_tenants_path(region: Region, radius_meters: u32) -> String {
    format!(
        "/tenants?coordinate={}&radius={radius_meters}&sport_id={SPORT_ID}&playtomic_status=ACTIVE&size={TENANT_PAGE_SIZE}",
        region.search_coordinate()
    )
}

/// Builds the availability path covering a whole date.
///
/// # Example
/// ```
/// use padel_slots::data_fetcher::api::build_availability_path;
///
/// let path = build_availability_path("abc", "2026-03-01");
/// assert_eq!(
///     path,
///     "/availability?sport_id=PADEL&tenant_id=abc&start_min=2026-03-01T00:00:00&start_max=2026-03-01T23:59:59"
/// );
/// ```
pub fn build_availability_path(tenant_id: &str, date: &str) -> String {
    format!(
        "/availability?sport_id={SPORT_ID}&tenant_id={tenant_id}&start_min={date}T00:00:00&start_max={date}T23:59:59"
    )
}

/// Builds the court listing path for a tenant.
pub fn build_resources_path(tenant_id: &str) -> String {
    format!("/resources?tenant_id={tenant_id}&sport_id={SPORT_ID}")
}

/// Joins a base URL and a relative path.
pub fn build_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

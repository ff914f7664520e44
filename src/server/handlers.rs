use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use super::AppState;
use super::discovery::{CourtDiscoveryReport, discover_courts};
use crate::data_fetcher::models::Region;
use crate::data_fetcher::processors::parse_date;
use crate::error::AppError;

/// `Cache-Control` for slot listings.
pub const SLOTS_CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=60";

/// `Cache-Control` for the club listing.
pub const CLUBS_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=60";

#[derive(Debug, Default, Deserialize)]
pub struct SlotsParams {
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TenantsParams {
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityParams {
    pub tenant_id: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourcesParams {
    pub tenant_id: Option<String>,
}

/// `GET /slots?date=YYYY-MM-DD`
pub async fn slots(
    State(state): State<AppState>,
    Query(params): Query<SlotsParams>,
) -> Result<Response, AppError> {
    let date = required_date(params.date.as_deref())
        .ok_or_else(|| AppError::invalid_parameter("date is required (YYYY-MM-DD)"))?;

    // Background prefetch runs at most once per Bali day
    let _ = state.aggregator.warm_up(state.warm_up_days).await;

    let slots = state.aggregator.fetch_slots_for_date(&date).await;
    debug!("Serving {} slots for {date}", slots.len());
    Ok(with_cache_control(Json(slots), SLOTS_CACHE_CONTROL))
}

/// `GET /clubs`
pub async fn clubs(State(state): State<AppState>) -> Response {
    let clubs = state.aggregator.fetch_all_clubs().await;
    with_cache_control(Json(clubs), CLUBS_CACHE_CONTROL)
}

/// `GET /tenants?location=ubud|sanur`
pub async fn tenants(
    State(state): State<AppState>,
    Query(params): Query<TenantsParams>,
) -> Result<Response, AppError> {
    let region = params
        .location
        .as_deref()
        .and_then(Region::from_query)
        .ok_or_else(|| AppError::invalid_parameter("Invalid location"))?;

    let tenants = state.aggregator.upstream().fetch_tenants(region).await;
    Ok(Json(tenants).into_response())
}

/// `GET /availability?tenant_id=..&date=YYYY-MM-DD`
pub async fn availability(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Response, AppError> {
    let missing = || AppError::invalid_parameter("tenant_id and date are required");
    let tenant_id = required_id(params.tenant_id.as_deref()).ok_or_else(missing)?;
    let date = required_date(params.date.as_deref()).ok_or_else(missing)?;

    let availability = state
        .aggregator
        .upstream()
        .fetch_availability(tenant_id, &date)
        .await;
    Ok(Json(availability).into_response())
}

/// `GET /resources?tenant_id=..`
pub async fn resources(
    State(state): State<AppState>,
    Query(params): Query<ResourcesParams>,
) -> Result<Response, AppError> {
    let tenant_id = required_id(params.tenant_id.as_deref())
        .ok_or_else(|| AppError::invalid_parameter("tenant_id is required"))?;

    let resources = state.aggregator.upstream().fetch_resources(tenant_id).await;
    Ok(Json(resources).into_response())
}

/// `GET /discover-courts`
pub async fn discover(State(state): State<AppState>) -> Json<CourtDiscoveryReport> {
    Json(discover_courts(&state.aggregator).await)
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let caches = state.aggregator.cache_stats().await;
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "caches": caches,
    }))
}

fn with_cache_control(body: impl IntoResponse, value: &'static str) -> Response {
    let mut response = body.into_response();
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static(value));
    response
}

/// A strict `YYYY-MM-DD` date, or `None` when absent or malformed.
fn required_date(date: Option<&str>) -> Option<String> {
    let date = date?.trim();
    parse_date(date).ok()?;
    Some(date.to_string())
}

/// A tenant id made of letters, digits, `-` and `_`.
///
/// Ids are interpolated into upstream query strings, so anything else is refused.
fn required_id(id: Option<&str>) -> Option<&str> {
    let id = id?.trim();
    let valid = !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_date() {
        assert_eq!(required_date(Some("2026-03-01")), Some("2026-03-01".to_string()));
        assert_eq!(required_date(Some("2026-3-1")), None);
        assert_eq!(required_date(Some("2026-02-30")), None);
        assert_eq!(required_date(None), None);
    }

    #[test]
    fn test_required_id() {
        assert_eq!(required_id(Some("9a18884f-abc_1")), Some("9a18884f-abc_1"));
        assert_eq!(required_id(Some("a&radius=1")), None);
        assert_eq!(required_id(Some("  ")), None);
        assert_eq!(required_id(None), None);
    }
}

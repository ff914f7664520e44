use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use padel_slots::data_fetcher::api::create_http_client_with_timeout;
use padel_slots::data_fetcher::cache::TtlCache;
use padel_slots::data_fetcher::{CourtNameResolver, SlotAggregator, UpstreamClient};
use padel_slots::server::{AppState, build_router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn router(base_url: String) -> Router {
    let client = create_http_client_with_timeout(5).unwrap();
    let upstream = UpstreamClient::new(
        client,
        vec![base_url],
        8000,
        Arc::new(TtlCache::new("responses")),
    );
    let aggregator = SlotAggregator::new(upstream, Arc::new(CourtNameResolver::new()));
    // No background warm-up so upstream hit counts stay predictable
    build_router(AppState::new(aggregator, 0))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, cache_control, body)
}

async fn mount_single_club(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/tenants"))
        .and(query_param("coordinate", "-8.506,115.262"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"tenant_id": "9a18884f-1111", "name": "Bam Bam Padel Ubud", "slug": "bam-bam-padel"}
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tenants"))
        .and(query_param("coordinate", "-8.700,115.263"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/availability"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "resource_id": "a7c47627-2222",
            "start_date": "2026-03-01",
            "slots": [{"start_time": "11:00:00", "duration": 90, "price": "450.000"}]
        }])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"resource_id": "a7c47627-2222", "name": "Bandeja"}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_slots_requires_date() {
    let server = MockServer::start().await;
    let app = router(server.uri());

    let (status, _, body) = get(app.clone(), "/slots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "date is required (YYYY-MM-DD)"}));

    let (status, _, _) = get(app, "/slots?date=01-03-2026").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_slots_returns_sorted_slots_with_cache_header() {
    let server = MockServer::start().await;
    mount_single_club(&server).await;

    let (status, cache_control, body) = get(router(server.uri()), "/slots?date=2026-03-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache_control.as_deref(),
        Some("public, s-maxage=300, stale-while-revalidate=60")
    );
    assert_eq!(
        body,
        json!([{
            "id": "9a18884f-1111-a7c47627-2222-2026-03-01-19:00:00-90",
            "tenantId": "9a18884f-1111",
            "tenantSlug": "bam-bam-padel",
            "club": "Bam Bam Padel Ubud",
            "location": "Ubud",
            "date": "2026-03-01",
            "time": "19:00:00",
            "court": "Bandeja",
            "price": 450000,
            "available": true,
            "duration": 90
        }])
    );
}

#[tokio::test]
async fn test_slots_upstream_failure_is_empty_200() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, _, body) = get(router(server.uri()), "/slots?date=2026-03-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_clubs() {
    let server = MockServer::start().await;
    mount_single_club(&server).await;

    let (status, cache_control, body) = get(router(server.uri()), "/clubs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache_control.as_deref(),
        Some("public, s-maxage=3600, stale-while-revalidate=60")
    );
    assert_eq!(
        body,
        json!([{"id": "9a18884f-1111", "name": "Bam Bam Padel Ubud", "location": "Ubud"}])
    );
}

#[tokio::test]
async fn test_tenants_validates_location() {
    let server = MockServer::start().await;
    mount_single_club(&server).await;
    let app = router(server.uri());

    let (status, _, body) = get(app.clone(), "/tenants?location=canggu").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid location"}));

    let (status, _, body) = get(app.clone(), "/tenants").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid location");

    let (status, _, body) = get(app, "/tenants?location=ubud").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "9a18884f-1111");
    assert_eq!(body[0]["slug"], "bam-bam-padel");
}

#[tokio::test]
async fn test_availability_and_resources_parameters() {
    let server = MockServer::start().await;
    mount_single_club(&server).await;
    let app = router(server.uri());

    let (status, _, body) = get(app.clone(), "/availability?tenant_id=9a18884f-1111").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "tenant_id and date are required"}));

    let (status, _, _) = get(app.clone(), "/availability?date=2026-03-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = get(app.clone(), "/resources").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "tenant_id is required"}));

    let (status, _, body) = get(
        app.clone(),
        "/availability?tenant_id=9a18884f-1111&date=2026-03-01",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["resource_id"], "a7c47627-2222");
    assert_eq!(body[0]["slots"][0]["start_time"], "19:00:00");
    assert_eq!(body[0]["slots"][0]["price"], 450000);

    let (status, _, body) = get(app, "/resources?tenant_id=9a18884f-1111").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": "a7c47627-2222", "name": "Bandeja"}]));
}

#[tokio::test]
async fn test_discover_courts_reports_mismatch() {
    let server = MockServer::start().await;
    mount_single_club(&server).await;

    let (status, _, body) = get(router(server.uri()), "/discover-courts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["totalTenants"], 1);
    assert_eq!(body["summary"]["status"], "ACTION_REQUIRED");
    let court = &body["reports"][0]["courts"][0];
    assert_eq!(court["apiName"], "Bandeja");
    assert_eq!(court["fallbackName"], "Bandeja Court");
    assert_eq!(court["status"], "MISMATCH");
    assert!(
        body["correctedSnippet"]
            .as_str()
            .unwrap()
            .contains("\"9a18884f::a7c47627\": \"Bandeja\",")
    );
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let (status, _, body) = get(router(server.uri()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "padel_slots");
    assert!(body["caches"]["responses"].is_object());
    assert_eq!(body["caches"]["slots"]["entries"], 0);
}

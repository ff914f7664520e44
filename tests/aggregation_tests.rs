use futures::future::join_all;
use padel_slots::data_fetcher::api::create_http_client_with_timeout;
use padel_slots::data_fetcher::cache::TtlCache;
use padel_slots::data_fetcher::models::Region;
use padel_slots::data_fetcher::{CourtNameResolver, SlotAggregator, UpstreamClient};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DATE: &str = "2026-03-01";
const UBUD: &str = "-8.506,115.262";
const SANUR: &str = "-8.700,115.263";

fn aggregator(bases: Vec<String>) -> SlotAggregator {
    let client = create_http_client_with_timeout(5).unwrap();
    let upstream = UpstreamClient::new(client, bases, 8000, Arc::new(TtlCache::new("responses")));
    SlotAggregator::new(upstream, Arc::new(CourtNameResolver::new()))
}

fn tenant(id: &str, name: &str, coordinate: Option<(f64, f64)>) -> Value {
    match coordinate {
        Some((lat, lon)) => json!({
            "tenant_id": id,
            "tenant_name": name,
            "address": {"coordinate": {"lat": lat, "lon": lon}}
        }),
        None => json!({"tenant_id": id, "tenant_name": name}),
    }
}

async fn mount_tenants(server: &MockServer, coordinate: &str, tenants: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/tenants"))
        .and(query_param("coordinate", coordinate))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": tenants })))
        .mount(server)
        .await;
}

async fn mount_club(server: &MockServer, tenant_id: &str, resource_id: &str, court: &str) {
    Mock::given(method("GET"))
        .and(path("/availability"))
        .and(query_param("tenant_id", tenant_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "resource_id": resource_id,
            "start_date": DATE,
            "slots": [
                {"start_time": "10:00:00", "duration": 90, "price": "300.000 IDR"},
                {"start_time": "01:00:00", "duration": 60, "price": 150000.0}
            ]
        }])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resources"))
        .and(query_param("tenant_id", tenant_id))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"resource_id": resource_id, "name": court}])),
        )
        .mount(server)
        .await;
}

/// Ubud returns A and B, Sanur returns B and C. B sits next to Sanur and C has
/// no coordinate, so A lands in Ubud while B and C land in Sanur, each once.
async fn mount_two_region_scenario(server: &MockServer) {
    mount_tenants(
        server,
        UBUD,
        vec![
            tenant("club-a", "Bam Bam Padel Ubud", Some((-8.51, 115.26))),
            tenant("club-b", "Simply Padel", Some((-8.69, 115.26))),
        ],
    )
    .await;
    mount_tenants(
        server,
        SANUR,
        vec![
            tenant("club-b", "Simply Padel", Some((-8.69, 115.26))),
            tenant("club-c", "Padel of Gods", None),
        ],
    )
    .await;
    mount_club(server, "club-a", "res-a", "Golden Point").await;
    mount_club(server, "club-b", "res-b", " Court 1 (Satu) ").await;
    mount_club(server, "club-c", "res-c", "Karma").await;
}

#[tokio::test]
async fn test_two_region_dedup_and_assignment() {
    let server = MockServer::start().await;
    mount_two_region_scenario(&server).await;

    let slots = aggregator(vec![server.uri()]).fetch_slots_for_date(DATE).await;

    // Three clubs with two slots each, none duplicated
    assert_eq!(slots.len(), 6);
    let mut ids: Vec<_> = slots.iter().map(|s| s.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 6);

    for slot in &slots {
        let expected = match slot.tenant_id.as_str() {
            "club-a" => Region::Ubud,
            _ => Region::Sanur,
        };
        assert_eq!(slot.location, expected, "{}", slot.club);
        assert_eq!(slot.date, DATE);
        assert!(slot.available);
    }

    // Sorted by time, converted to Bali
    let times: Vec<_> = slots.iter().map(|s| s.time.as_str()).collect();
    assert_eq!(
        times,
        vec!["09:00:00", "09:00:00", "09:00:00", "18:00:00", "18:00:00", "18:00:00"]
    );

    let simply = slots
        .iter()
        .find(|s| s.tenant_id == "club-b" && s.duration == 90)
        .unwrap();
    assert_eq!(simply.court, "Court 1 (Satu)");
    assert_eq!(simply.price, 300000);
    assert_eq!(simply.id, "club-b-res-b-2026-03-01-18:00:00-90");
}

#[tokio::test]
async fn test_failing_region_still_returns_other_region() {
    let server = MockServer::start().await;
    mount_tenants(
        &server,
        UBUD,
        vec![tenant("club-a", "Bam Bam Padel Ubud", Some((-8.51, 115.26)))],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/tenants"))
        .and(query_param("coordinate", SANUR))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_club(&server, "club-a", "res-a", "Golden Point").await;

    let slots = aggregator(vec![server.uri()]).fetch_slots_for_date(DATE).await;

    assert_eq!(slots.len(), 2);
    assert!(slots.iter().all(|s| s.location == Region::Ubud));
}

#[tokio::test]
async fn test_total_outage_yields_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let slots = aggregator(vec![server.uri()]).fetch_slots_for_date(DATE).await;
    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_concurrent_requests_share_one_upstream_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tenants"))
        .and(query_param("coordinate", UBUD))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([tenant("club-a", "Bam Bam Padel Ubud", None)]))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tenants"))
        .and(query_param("coordinate", SANUR))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    mount_club(&server, "club-a", "res-a", "Golden Point").await;

    let aggregator = aggregator(vec![server.uri()]);
    let results = join_all((0..5).map(|_| aggregator.fetch_slots_for_date(DATE))).await;

    assert!(results.iter().all(|slots| slots.len() == 2));
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    // Mock expectations are verified when the server drops
}

#[tokio::test]
async fn test_results_are_memoized_per_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tenants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let aggregator = aggregator(vec![server.uri()]);
    aggregator.fetch_slots_for_date(DATE).await;
    aggregator.fetch_slots_for_date(DATE).await;

    let stats = aggregator.cache_stats().await;
    assert_eq!(stats["slots"].entries, 1);
    assert_eq!(stats["slots"].hits, 1);

    aggregator.clear_slot_cache().await;
    assert_eq!(aggregator.cache_stats().await["slots"].entries, 0);
}

#[tokio::test]
async fn test_primary_failure_falls_back_to_secondary() {
    let primary = MockServer::start().await;
    let fallback = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&primary)
        .await;
    mount_two_region_scenario(&fallback).await;

    let slots = aggregator(vec![primary.uri(), fallback.uri()])
        .fetch_slots_for_date(DATE)
        .await;

    assert_eq!(slots.len(), 6);
}

#[tokio::test]
async fn test_fetch_all_clubs() {
    let server = MockServer::start().await;
    mount_two_region_scenario(&server).await;

    let clubs = aggregator(vec![server.uri()]).fetch_all_clubs().await;

    let listed: Vec<_> = clubs
        .iter()
        .map(|c| (c.name.as_str(), c.location))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("Bam Bam Padel Ubud", Region::Ubud),
            ("Padel of Gods", Region::Sanur),
            ("Simply Padel", Region::Sanur),
        ]
    );
}

#[tokio::test]
async fn test_court_names_fall_back_when_resources_fail() {
    let server = MockServer::start().await;
    mount_tenants(
        &server,
        UBUD,
        vec![tenant("9a18884f-0000", "Bam Bam Padel Ubud", None)],
    )
    .await;
    mount_tenants(&server, SANUR, vec![]).await;
    Mock::given(method("GET"))
        .and(path("/availability"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"resource_id": "78c071c3-aaaa", "start_date": DATE, "slots": [{"start_time": "02:00:00", "duration": 60, "price": 100000}]},
            {"resource_id": "deadbeef-bbbb", "start_date": DATE, "slots": [{"start_time": "03:00:00", "duration": 60, "price": 100000}]}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resources"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let slots = aggregator(vec![server.uri()]).fetch_slots_for_date(DATE).await;

    let courts: Vec<_> = slots.iter().map(|s| s.court.as_str()).collect();
    assert_eq!(courts, vec!["Golden Point Court", "Court deadbeef"]);
}

#[tokio::test]
async fn test_partial_result_is_not_memoized() {
    let server = MockServer::start().await;
    mount_tenants(
        &server,
        UBUD,
        vec![tenant("club-a", "Bam Bam Padel Ubud", Some((-8.51, 115.26)))],
    )
    .await;
    // Sanur's search fails once, then recovers
    Mock::given(method("GET"))
        .and(path("/tenants"))
        .and(query_param("coordinate", SANUR))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_tenants(
        &server,
        SANUR,
        vec![tenant("club-b", "Simply Padel", Some((-8.69, 115.26)))],
    )
    .await;
    mount_club(&server, "club-a", "res-a", "Golden Point").await;
    mount_club(&server, "club-b", "res-b", "Court 1").await;

    let aggregator = aggregator(vec![server.uri()]);

    let degraded = aggregator.fetch_slots_for_date(DATE).await;
    assert_eq!(degraded.len(), 2);
    assert!(degraded.iter().all(|s| s.location == Region::Ubud));
    assert_eq!(aggregator.cache_stats().await["slots"].entries, 0);

    let recovered = aggregator.fetch_slots_for_date(DATE).await;
    assert_eq!(recovered.len(), 4);
    assert!(recovered.iter().any(|s| s.location == Region::Sanur));
    assert_eq!(aggregator.cache_stats().await["slots"].entries, 1);
}

#[tokio::test]
async fn test_failed_club_availability_is_not_memoized() {
    let server = MockServer::start().await;
    mount_tenants(
        &server,
        UBUD,
        vec![tenant("club-a", "Bam Bam Padel Ubud", Some((-8.51, 115.26)))],
    )
    .await;
    mount_tenants(&server, SANUR, vec![]).await;
    Mock::given(method("GET"))
        .and(path("/availability"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_club(&server, "club-a", "res-a", "Golden Point").await;

    let aggregator = aggregator(vec![server.uri()]);

    assert!(aggregator.fetch_slots_for_date(DATE).await.is_empty());
    assert_eq!(aggregator.fetch_slots_for_date(DATE).await.len(), 2);
}

#[tokio::test]
async fn test_club_without_coordinate_in_both_regions_is_listed_once() {
    let server = MockServer::start().await;
    let nomad = tenant("club-n", "Nomad Padel", None);
    mount_tenants(&server, UBUD, vec![nomad.clone()]).await;
    mount_tenants(&server, SANUR, vec![nomad]).await;
    mount_club(&server, "club-n", "res-n", "Center").await;

    let aggregator = aggregator(vec![server.uri()]);
    let slots = aggregator.fetch_slots_for_date(DATE).await;

    assert_eq!(slots.len(), 2);
    assert!(slots.iter().all(|s| s.location == Region::Ubud));

    let clubs = aggregator.fetch_all_clubs().await;
    assert_eq!(clubs.len(), 1);
    assert_eq!(clubs[0].location, Region::Ubud);
}

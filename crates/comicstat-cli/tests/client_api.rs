//! Integration tests for the catalog client against a mock HTTP server.

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use comicstat::sample::{build_sample, SamplePlan};
use comicstat::stats::compute_stats;
use comicstat::types::CatalogError;
use comicstat_cli::client::CatalogClient;
use comicstat_cli::config::ClientConfig;

const API_KEY: &str = "test-key";

fn character(id: u64, name: &str, comics: u64, description: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": description,
        "comics": { "available": comics },
        "series": { "available": comics / 2 },
        "stories": { "available": comics * 2 },
        "events": { "available": 0 },
    })
}

fn envelope(results: Vec<Value>, offset: u32, total: u64) -> Value {
    json!({
        "code": 200,
        "status": "Ok",
        "data": {
            "offset": offset,
            "limit": 20,
            "total": total,
            "count": results.len(),
            "results": results,
        }
    })
}

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(ClientConfig::single_endpoint(API_KEY, &server.uri())).unwrap()
}

#[tokio::test]
async fn test_get_characters_parses_envelope_and_passes_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/characters"))
        .and(query_param("apikey", API_KEY))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            vec![
                character(1, "Ant-Man", 12, Some("shrinks")),
                character(2, "Beast", 30, None),
            ],
            40,
            1564,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).get_characters(2, 40).await.unwrap();
    assert_eq!(page.total, 1564);
    assert_eq!(page.offset, 40);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].name, "Ant-Man");
    assert_eq!(page.results[1].comics.available, 30);
}

#[tokio::test]
async fn test_search_characters_passes_name_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/characters"))
        .and(query_param("nameStartsWith", "Spider"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            vec![character(3, "Spider-Man", 4000, Some("web-slinger"))],
            0,
            1,
        )))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search_characters("Spider", 20)
        .await
        .unwrap();
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].name, "Spider-Man");
}

#[tokio::test]
async fn test_get_character_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/characters/1011334"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            vec![character(1011334, "3-D Man", 12, None)],
            0,
            1,
        )))
        .mount(&server)
        .await;

    let record = client_for(&server).get_character(1011334).await.unwrap();
    assert_eq!(record.unwrap().name, "3-D Man");
}

#[tokio::test]
async fn test_get_character_missing_id_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/characters/999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![], 0, 0)))
        .mount(&server)
        .await;

    let record = client_for(&server).get_character(999).await.unwrap();
    assert!(record.is_none());
}

#[tokio::test]
async fn test_search_comics_passes_title_prefix() {
    let server = MockServer::start().await;
    let comic = json!({
        "id": 183,
        "title": "X-Men (1991) #1",
        "issueNumber": 1,
        "pageCount": 36,
        "prices": [{ "type": "printPrice", "price": 1.5 }],
    });
    Mock::given(method("GET"))
        .and(path("/comics"))
        .and(query_param("titleStartsWith", "X-Men"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(vec![comic], 0, 1)),
        )
        .mount(&server)
        .await;

    let page = client_for(&server).search_comics("X-Men", 12).await.unwrap();
    assert_eq!(page.results[0].title, "X-Men (1991) #1");
    assert_eq!(page.results[0].page_count, Some(36));
}

#[tokio::test]
async fn test_non_success_status_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/characters"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_characters(20, 0).await.unwrap_err();
    match err {
        CatalogError::Status { status, endpoint } => {
            assert_eq!(status, 409);
            assert_eq!(endpoint, "characters");
        }
        other => panic!("expected status error, got {other}"),
    }
}

#[tokio::test]
async fn test_unexpected_body_shape_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/characters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let err = client_for(&server).get_characters(20, 0).await.unwrap_err();
    assert!(matches!(err, CatalogError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_fallback_endpoint_is_tried_after_direct_failure() {
    let direct = MockServer::start().await;
    let proxied = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/characters"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&direct)
        .await;
    Mock::given(method("GET"))
        .and(path("/characters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            vec![character(1, "Ant-Man", 12, None)],
            0,
            1,
        )))
        .expect(1)
        .mount(&proxied)
        .await;

    let config = ClientConfig {
        api_key: API_KEY.to_string(),
        endpoints: vec![direct.uri(), proxied.uri()],
        timeout_ms: 5_000,
    };
    let page = CatalogClient::new(config)
        .unwrap()
        .get_characters(20, 0)
        .await
        .unwrap();
    assert_eq!(page.results.len(), 1);
}

#[tokio::test]
async fn test_exhausted_fallbacks_surface_last_error() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&second)
        .await;

    let config = ClientConfig {
        api_key: API_KEY.to_string(),
        endpoints: vec![first.uri(), second.uri()],
        timeout_ms: 5_000,
    };
    let err = CatalogClient::new(config)
        .unwrap()
        .get_characters(20, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_probe_reports_every_endpoint() {
    let healthy = MockServer::start().await;
    let broken = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/characters"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            vec![character(1, "Ant-Man", 12, None)],
            0,
            1564,
        )))
        .mount(&healthy)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken)
        .await;

    let config = ClientConfig {
        api_key: API_KEY.to_string(),
        endpoints: vec![healthy.uri(), broken.uri()],
        timeout_ms: 5_000,
    };
    let attempts = CatalogClient::new(config).unwrap().probe().await;

    assert_eq!(attempts.len(), 2);
    assert!(attempts[0].ok);
    assert!(attempts[0].detail.contains("1564"));
    assert!(!attempts[1].ok);
}

#[tokio::test]
async fn test_dashboard_sample_builds_against_paged_server() {
    let server = MockServer::start().await;

    // Three pages with overlapping ids; ids 1-6 repeat across pages.
    let pages = [
        (0u32, (1..=6).collect::<Vec<u64>>()),
        (6u32, vec![5, 6, 7, 8, 9, 10]),
        (12u32, vec![9, 10, 11, 12, 13, 14]),
    ];
    for (offset, ids) in &pages {
        let results: Vec<Value> = ids
            .iter()
            .map(|&id| character(id, &format!("character-{id}"), id, Some("present")))
            .collect();
        Mock::given(method("GET"))
            .and(path("/characters"))
            .and(query_param("offset", offset.to_string()))
            .and(query_param("limit", "6"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(results, *offset, 100)),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let plan = SamplePlan {
        page_count: 3,
        page_size: 6,
        sample_cap: 10,
    };
    let sample = build_sample(&client, &plan).await.unwrap();

    let ids: Vec<u64> = sample.iter().map(|r| r.id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());

    let stats = compute_stats(&sample).unwrap();
    assert_eq!(stats.total_count, 10);
    assert_eq!(stats.total_comics, 55);
    assert_eq!(stats.min_comics, 1);
    assert_eq!(stats.max_comics, 10);
    assert_eq!(stats.description_coverage_pct, 100);
}

#[tokio::test]
async fn test_failed_page_aborts_dashboard_sample() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/characters"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            vec![character(1, "Ant-Man", 12, None)],
            0,
            100,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/characters"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = build_sample(&client, &SamplePlan::default()).await.unwrap_err();
    assert!(matches!(err, CatalogError::Status { status: 503, .. }));
}

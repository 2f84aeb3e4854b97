mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use common::{create_state, FakeProvider, QUOTA_BODY, SEARCH_BODY};
use moodtube::routes::create_router;

fn create_test_server(api_key: Option<&str>, provider: FakeProvider) -> TestServer {
    let app = create_router(create_state(api_key, provider));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(Some("key"), FakeProvider::replying(200, "{}"));
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_search_relays_upstream_body() {
    let provider = FakeProvider::replying(200, SEARCH_BODY);
    let server = create_test_server(Some("secret"), provider.clone());

    let response = server
        .get("/api/v1/youtube-search")
        .add_query_param("q", "lofi happy study music playlist")
        .add_query_param("max", "4")
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), SEARCH_BODY);
    assert_eq!(
        response.header("cache-control").to_str().unwrap(),
        "public, max-age=60"
    );
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/json"
    );

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].api_key, "secret");
    assert_eq!(calls[0].query, "lofi happy study music playlist");
    assert_eq!(calls[0].max_results, 4);
}

#[tokio::test]
async fn test_search_missing_credential() {
    let provider = FakeProvider::replying(200, SEARCH_BODY);
    let server = create_test_server(None, provider.clone());

    let response = server
        .get("/api/v1/youtube-search")
        .add_query_param("q", "jazz")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Server missing youtube_API");
    assert_eq!(body["code"], "configuration");
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_search_empty_query() {
    let provider = FakeProvider::replying(200, SEARCH_BODY);
    let server = create_test_server(Some("key"), provider.clone());

    let response = server
        .get("/api/v1/youtube-search")
        .add_query_param("q", "   ")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Missing query parameter q");
    assert_eq!(body["code"], "bad_request");

    let response = server.get("/api/v1/youtube-search").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_search_max_is_clamped_and_defaulted() {
    let provider = FakeProvider::replying(200, SEARCH_BODY);
    let server = create_test_server(Some("key"), provider.clone());

    server
        .get("/api/v1/youtube-search")
        .add_query_param("q", "rock")
        .add_query_param("max", "999")
        .await
        .assert_status_ok();
    server
        .get("/api/v1/youtube-search")
        .add_query_param("q", "rock")
        .await
        .assert_status_ok();
    server
        .get("/api/v1/youtube-search")
        .add_query_param("q", "rock")
        .add_query_param("max", "many")
        .await
        .assert_status_ok();

    let maxes: Vec<u32> = provider.calls().iter().map(|c| c.max_results).collect();
    assert_eq!(maxes, vec![12, 6, 6]);
}

#[tokio::test]
async fn test_search_upstream_error_passthrough() {
    let server = create_test_server(Some("key"), FakeProvider::replying(403, QUOTA_BODY));

    let response = server
        .get("/api/v1/youtube-search")
        .add_query_param("q", "edm")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"], "Upstream error");
    assert_eq!(body["status"], 403);
    assert_eq!(body["body"], QUOTA_BODY);
    assert_eq!(body["code"], "upstream_quota");
}

#[tokio::test]
async fn test_search_transport_failure() {
    let server = create_test_server(Some("key"), FakeProvider::unreachable("dns error"));

    let response = server
        .get("/api/v1/youtube-search")
        .add_query_param("q", "edm")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Request failed");
    assert_eq!(body["message"], "dns error");
    assert_eq!(body["code"], "request_failed");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(Some("key"), FakeProvider::replying(200, "{}"));
    let id = "7f2c1d5e-8a4b-4c3d-9e1f-0a1b2c3d4e5f";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id").to_str().unwrap(), id);
}

#[tokio::test]
async fn test_options_lists_known_keys() {
    let server = create_test_server(None, FakeProvider::replying(200, "{}"));

    let response = server.get("/api/v1/options").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["moods"][0], "senang");
    assert_eq!(body["activities"].as_array().unwrap().len(), 4);
    assert!(body["genres"]
        .as_array()
        .unwrap()
        .iter()
        .any(|g| g == "dangdut"));
}

#[tokio::test]
async fn test_query_endpoint() {
    let server = create_test_server(None, FakeProvider::replying(200, "{}"));

    let response = server
        .get("/api/v1/query")
        .add_query_param("mood", "capek")
        .add_query_param("activity", "bersantai")
        .add_query_param("genre", "jazz")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["query"],
        "jazz calm chill relaxing soothing relax ambient soft music playlist"
    );

    let response = server
        .get("/api/v1/query")
        .add_query_param("mood", "capek")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unreadable_query_string_is_json_bad_request() {
    let provider = FakeProvider::replying(200, SEARCH_BODY);
    let server = create_test_server(Some("key"), provider.clone());

    let response = server
        .get("/api/v1/youtube-search")
        .add_query_param("q", "a")
        .add_query_param("q", "b")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response
        .header("content-type")
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
    assert!(body["error"].as_str().unwrap().contains("duplicate field"));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_query_endpoint_unreadable_query_string() {
    let server = create_test_server(None, FakeProvider::replying(200, "{}"));

    let response = server
        .get("/api/v1/query")
        .add_query_param("mood", "capek")
        .add_query_param("mood", "sedih")
        .add_query_param("activity", "bersantai")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
}

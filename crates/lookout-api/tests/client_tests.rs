//! Integration tests for the feed API client against a mock server.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lookout_api::{ApiClient, ApiError};
use lookout_core::types::{AgentState, ItemKind};

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn fetch_agent_status_parses_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/agents/status"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"agents":[
                {"key":"po","display_name":"Product Owner","last_seen_at":"2026-08-25T12:00:00Z","state":"working"},
                {"key":"qa","last_seen_at":"2026-08-25T11:55:00Z","state":"idle"}
            ]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let response = client_for(&server).await.fetch_agent_status().await.unwrap();
    assert_eq!(response.agents.len(), 2);
    assert_eq!(response.agents[0].state, AgentState::Working);
    assert_eq!(response.agents[0].label(), "Product Owner");
    assert_eq!(response.agents[1].label(), "qa");
}

#[tokio::test]
async fn fetch_activity_parses_threaded_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/activity"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"items":[
                {"id":"42","kind":"issue","agent_key":"po","timestamp":"2026-08-25T12:00:00Z",
                 "payload":{"title":"Fix login","status":"open"}},
                {"id":"43","kind":"deploy","timestamp":"2026-08-25T12:05:00Z",
                 "parent_id":"42","payload":{}}
            ]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let response = client_for(&server).await.fetch_activity().await.unwrap();
    assert_eq!(response.items.len(), 2);
    assert_eq!(response.items[0].kind, ItemKind::Issue);
    assert!(response.items[0].is_open());
    assert_eq!(response.items[1].agent_key, None);
    assert_eq!(response.items[1].parent_id.as_deref(), Some("42"));
}

#[tokio::test]
async fn fetch_board_health_keeps_status_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/board/health"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"total_items":4,"by_status":{"Done":3,"Todo":1},"draft_items":1}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let health = client_for(&server).await.fetch_board_health().await.unwrap();
    let segments = health.segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].status, "Done");
    assert_eq!(segments[0].percent, 75.0);
    assert_eq!(segments[1].status, "Todo");
    assert_eq!(segments[1].percent, 25.0);
    assert_eq!(health.draft_items, 1);
}

#[tokio::test]
async fn fetch_blog_posts_parses_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/blog/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"posts":[{"slug":"hello","title":"Hello","published_at":"2026-08-01T00:00:00Z"}]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let response = client_for(&server).await.fetch_blog_posts().await.unwrap();
    assert_eq!(response.posts.len(), 1);
    assert_eq!(response.posts[0].slug, "hello");
    assert_eq!(response.posts[0].summary, "");
}

#[tokio::test]
async fn empty_collections_are_not_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/blog/posts"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"posts":[]}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let response = client_for(&server).await.fetch_blog_posts().await.unwrap();
    assert!(response.posts.is_empty());
}

#[tokio::test]
async fn server_error_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/agents/status"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend restarting"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .fetch_agent_status()
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert!(matches!(err, ApiError::ApiTransient(_)));
}

#[tokio::test]
async fn not_found_is_permanent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/activity"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such route"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.fetch_activity().await.unwrap_err();
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/board/health"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .fetch_board_health()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

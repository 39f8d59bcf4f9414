// ABOUTME: HttpQueryClient tests against a wiremock server standing in for the query service.
// ABOUTME: Checks request paths, bearer auth, JSON bodies, and status/decode error mapping.

use std::time::Duration;

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

use rewardbot::chat::{ClientError, HttpQueryClient, QueryClient, QueryRequest};

/// Client pointed at the server's `/api/genai` prefix, with a trailing slash
/// to exercise base-URL trimming.
fn client(server: &MockServer) -> HttpQueryClient {
    let base = format!("{}/api/genai/", server.uri());
    HttpQueryClient::new(&base, Duration::from_secs(5)).unwrap()
}

fn points_request() -> QueryRequest {
    QueryRequest {
        mobile_number: "9876543210".to_string(),
        query: "points?".to_string(),
    }
}

#[tokio::test]
async fn query_posts_json_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/genai/query"))
        .and(header("authorization", "Bearer tok-1"))
        .and(body_json(json!({
            "mobileNumber": "9876543210",
            "query": "points?"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": "You have 47,910 points.",
            "intent": "POINTS_INQUIRY"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .query(&points_request(), "tok-1")
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.response.as_deref(), Some("You have 47,910 points."));
    assert_eq!(response.intent.as_deref(), Some("POINTS_INQUIRY"));
}

#[tokio::test]
async fn health_reads_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/genai/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "UP",
            "service": "genai-service",
            "openai_status": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let health = client(&server).health().await.unwrap();

    assert!(health.is_up());
    assert_eq!(health.service.as_deref(), Some("genai-service"));
    assert_eq!(health.openai_status, Some(false));
}

#[tokio::test]
async fn test_query_posts_without_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/genai/test"))
        .and(body_json(json!({ "query": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": "ok"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server).test_query("hello").await.unwrap();

    assert_eq!(response.response.as_deref(), Some("ok"));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/genai/query"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "bad token" })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .query(&points_request(), "expired")
        .await
        .unwrap_err();

    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("bad token"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/genai/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).health().await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
}

//! Integration tests for the Ward API client

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use std::time::Duration;
use ward_http::{ApiClient, ClientError, TokenSource, UserDataRequest};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Deterministic identity collaborator for tests.
struct StaticToken(&'static str);

#[async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

/// Collaborator with no available session.
struct NoToken;

#[async_trait]
impl TokenSource for NoToken {
    async fn token(&self) -> Option<String> {
        None
    }
}

fn test_client(base_url: &str, source: impl TokenSource + 'static) -> ApiClient {
    ApiClient::builder()
        .base_url(base_url)
        .token_source(source)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_client_builder() {
    let client = ApiClient::builder()
        .base_url("http://localhost:8000/")
        .token_source(StaticToken("tok"))
        .build();

    assert!(client.is_ok());
    // Trailing slash is trimmed so path concatenation stays clean.
    assert_eq!(client.unwrap().base_url(), "http://localhost:8000");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = ApiClient::builder().token_source(StaticToken("tok")).build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_client_builder_requires_token_source() {
    let result = ApiClient::builder().base_url("http://localhost:8000").build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_successful_call_records_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), StaticToken("test-token"));
    let returned = client.call("/protected", Method::GET, None).await;

    assert_eq!(returned, json!({"message": "ok"}));
    assert_eq!(client.result_for("/protected"), Some(json!({"message": "ok"})));
    assert!(!client.is_in_flight("/protected"));
}

#[tokio::test]
async fn test_absent_token_is_passed_through_as_null() {
    let mock_server = MockServer::start().await;

    // The literal text "null" goes on the wire; the server decides.
    Mock::given(method("GET"))
        .and(path("/protected"))
        .and(header("authorization", "Bearer null"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), NoToken);
    client.call("/protected", Method::GET, None).await;

    assert_eq!(client.result_for("/protected"), Some(json!({"message": "ok"})));
}

#[tokio::test]
async fn test_http_failure_records_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(ResponseTemplate::new(403).set_body_string("nope"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), StaticToken("test-token"));
    client.call("/protected", Method::GET, None).await;

    assert_eq!(
        client.result_for("/protected"),
        Some(json!({"error": "HTTP 403: Forbidden"}))
    );
    assert!(!client.is_in_flight("/protected"));
}

#[tokio::test]
async fn test_try_call_surfaces_auth_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), StaticToken("stale-token"));
    let outcome = client.try_call("/protected", Method::GET, None).await;

    // The typed error lets callers react to the failure class while
    // the store is updated exactly as for `call`.
    let err = outcome.unwrap_err();
    assert!(err.is_auth_expired());
    assert_eq!(
        client.result_for("/protected"),
        Some(json!({"error": "HTTP 401: Unauthorized"}))
    );
    assert!(!client.is_in_flight("/protected"));
}

#[tokio::test]
async fn test_transport_failure_records_error_message() {
    // Nothing is listening on this port.
    let client = test_client("http://127.0.0.1:1", StaticToken("test-token"));
    client.call("/protected", Method::GET, None).await;

    let result = client.result_for("/protected").unwrap();
    assert!(result.get("error").is_some());
    assert!(!client.is_in_flight("/protected"));
}

#[tokio::test]
async fn test_non_json_success_body_records_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), StaticToken("test-token"));
    client.call("/protected", Method::GET, None).await;

    let result = client.result_for("/protected").unwrap();
    assert!(result.get("error").is_some());
}

#[tokio::test]
async fn test_post_sends_json_payload() {
    let mock_server = MockServer::start().await;

    let payload = UserDataRequest {
        name: "Ada".to_string(),
        message: "hello".to_string(),
    };
    payload.validate().unwrap();

    Mock::given(method("POST"))
        .and(path("/user/data"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Ada", "message": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "updated"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), StaticToken("test-token"));
    client
        .call(
            "/user/data",
            Method::POST,
            Some(serde_json::to_value(&payload).unwrap()),
        )
        .await;

    assert_eq!(
        client.result_for("/user/data"),
        Some(json!({"status": "updated"}))
    );
}

#[tokio::test]
async fn test_invalid_submission_is_rejected_before_dispatch() {
    let mock_server = MockServer::start().await;

    // The submission layer must not reach the network at all.
    Mock::given(method("POST"))
        .and(path("/user/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), StaticToken("test-token"));
    let payload = UserDataRequest {
        name: String::new(),
        message: "x".to_string(),
    };

    if payload.validate().is_ok() {
        client
            .call(
                "/user/data",
                Method::POST,
                Some(serde_json::to_value(&payload).unwrap()),
            )
            .await;
    }

    assert!(client.result_for("/user/data").is_none());
    mock_server.verify().await;
}

#[tokio::test]
async fn test_in_flight_flag_spans_dispatch_to_resolution() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "ok"}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), StaticToken("test-token"));
    assert!(!client.is_in_flight("/protected"));

    let pending = {
        let client = client.clone();
        tokio::spawn(async move { client.call("/protected", Method::GET, None).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(client.is_in_flight("/protected"));

    pending.await.unwrap();
    assert!(!client.is_in_flight("/protected"));
}

#[tokio::test]
async fn test_last_completion_wins_for_one_endpoint() {
    let mock_server = MockServer::start().await;

    // First request hits the slow mock once; the second falls through
    // to the fast one and resolves first.
    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"attempt": 1}))
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"attempt": 2})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), StaticToken("test-token"));

    let first = {
        let client = client.clone();
        tokio::spawn(async move { client.call("/protected", Method::GET, None).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Issued second, resolves first.
    client.call("/protected", Method::GET, None).await;
    assert_eq!(client.result_for("/protected"), Some(json!({"attempt": 2})));
    // Each call flips the flag independently; the second completion
    // clears it even while the first is still pending (last write).
    assert!(!client.is_in_flight("/protected"));

    // Once the slow call completes, its write wins the shared slot.
    first.await.unwrap();
    assert_eq!(client.result_for("/protected"), Some(json!({"attempt": 1})));
    assert!(!client.is_in_flight("/protected"));
}

#[tokio::test]
async fn test_results_snapshot_covers_all_endpoints() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_id": "u1"})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), StaticToken("test-token"));
    client.call("/protected", Method::GET, None).await;
    client.call("/user/profile", Method::GET, None).await;

    let results = client.results();
    assert_eq!(results.len(), 2);
    assert_eq!(results["/protected"], json!({"message": "ok"}));
    assert_eq!(results["/user/profile"], json!({"user_id": "u1"}));
}

//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::{BackoffType, Outcome};
use reqwest::Method;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(format!("{}/api/", server.uri()))
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 0);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("baserow-client/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.baserow.io/api/")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .rate_limit(RateLimiterConfig::per_second(2))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(
        config.base_url,
        Some("https://api.baserow.io/api/".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 2)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("page", "1")
        .query("size", "10")
        .header("Authorization", "Token abc")
        .json(serde_json::json!({"key": "value"}));

    assert_eq!(
        config.query,
        vec![
            ("page".to_string(), "1".to_string()),
            ("size".to_string(), "10".to_string())
        ]
    );
    assert_eq!(
        config.headers.get("Authorization"),
        Some(&"Token abc".to_string())
    );
    assert!(config.body.is_some());
}

#[test]
fn test_http_client_debug() {
    let config = HttpClientConfig::builder()
        .base_url("https://baserow.example.org/api/")
        .build();
    let debug = format!("{:?}", HttpClient::with_config(config).unwrap());

    assert!(debug.starts_with("HttpClient"));
    assert!(debug.contains("baserow.example.org"));
    assert!(debug.contains("has_rate_limiter: false"));
}

#[test]
fn test_build_url() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.baserow.io/api/")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(
        client.build_url("database/tables/database/1/"),
        "https://api.baserow.io/api/database/tables/database/1/"
    );
    assert_eq!(
        client.build_url("/user/token-auth/"),
        "https://api.baserow.io/api/user/token-auth/"
    );
    assert_eq!(
        client.build_url("https://other.example/api/rows/?page=2"),
        "https://other.example/api/rows/?page=2"
    );
}

#[test]
fn test_calculate_backoff() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_millis(500),
        )
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(client.calculate_backoff(3), Duration::from_millis(500));
}

#[tokio::test]
async fn test_http_client_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/database/tables/database/7/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id": 1, "name": "person"}])),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let data: serde_json::Value = client
        .get_json("database/tables/database/7/")
        .await
        .unwrap();

    assert_eq!(data[0]["name"], "person");
}

#[tokio::test]
async fn test_http_client_headers_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/database/rows/table/3/"))
        .and(header("Authorization", "Token secret"))
        .and(header("X-Default", "yes"))
        .and(query_param("user_field_names", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(format!("{}/api", mock_server.uri()))
        .header("X-Default", "yes")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client
        .get_with_config(
            "database/rows/table/3/",
            RequestConfig::new()
                .query("user_field_names", "true")
                .header("Authorization", "Token secret"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/rows/1/"))
        .and(body_json(serde_json::json!({"Name": "Susi"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1, "Name": "Susi"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let row: serde_json::Value = client
        .request_json(
            Method::PATCH,
            "rows/1/",
            RequestConfig::new().json(serde_json::json!({"Name": "Susi"})),
        )
        .await
        .unwrap();

    assert_eq!(row["id"], 1);
}

#[tokio::test]
async fn test_http_client_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/missing/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get("missing/").await.unwrap_err();

    match err {
        Error::Api { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_non_json_body_is_protocol_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_json::<serde_json::Value>("html/")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Protocol { .. }));
}

#[tokio::test]
async fn test_http_client_transport_error() {
    let config = HttpClientConfig::builder()
        .base_url("http://127.0.0.1:1/api/")
        .timeout(Duration::from_secs(2))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client.get("anything/").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_http_client_outcome_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/database/tables/9/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let outcome = client
        .outcome(Method::DELETE, "database/tables/9/", RequestConfig::new())
        .await
        .unwrap();

    assert!(!outcome.is_applied());
    assert_eq!(outcome.rejected_status(), Some(403));
}

#[tokio::test]
async fn test_http_client_outcome_json_applied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/database/tables/database/1/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 5, "name": "t"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let outcome: Outcome<serde_json::Value> = client
        .outcome_json(
            Method::POST,
            "database/tables/database/1/",
            RequestConfig::new().json(serde_json::json!({"name": "t"})),
        )
        .await
        .unwrap();

    assert_eq!(outcome.applied().unwrap()["id"], 5);
}

#[tokio::test]
async fn test_http_client_no_retry_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/flaky/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get("flaky/").await.unwrap_err();

    assert!(matches!(err, Error::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_http_client_retry_on_500_when_enabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/flaky/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/flaky/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(format!("{}/api/", mock_server.uri()))
        .max_retries(3)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let response = client.get("flaky/").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_rate_limit_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited/"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(format!("{}/api/", mock_server.uri()))
        .max_retries(1)
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let err = client.get("limited/").await.unwrap_err();

    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: 0
        }
    ));
}

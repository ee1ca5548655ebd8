//! Tests for the auth module

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(format!("{}/api/", server.uri()))
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_token_authorization() {
    let auth = Authenticator::new("db-token", None);
    assert_eq!(
        auth.authorization(AuthScheme::Token).unwrap(),
        "Token db-token"
    );
    assert!(!auth.has_jwt());
}

#[test]
fn test_token_authorization_without_login() {
    let auth = Authenticator::new("db-token", None);
    assert_eq!(auth.token_authorization(), "Token db-token");
}

#[test]
fn test_jwt_authorization_requires_login() {
    let auth = Authenticator::new("db-token", None);
    let err = auth.authorization(AuthScheme::Jwt).unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));

    let auth = Authenticator::new("db-token", Some("jwt-token".to_string()));
    assert_eq!(auth.authorization(AuthScheme::Jwt).unwrap(), "JWT jwt-token");
}

#[test]
fn test_apply_sets_header() {
    let auth = Authenticator::new("db-token", Some("jwt-token".to_string()));
    let config = auth.apply(RequestConfig::new(), AuthScheme::Jwt).unwrap();
    assert_eq!(
        config.headers.get("Authorization"),
        Some(&"JWT jwt-token".to_string())
    );
}

#[test]
fn test_debug_redacts_token() {
    let auth = Authenticator::new("super-secret", None);
    assert!(!format!("{auth:?}").contains("super-secret"));
}

#[tokio::test]
async fn test_login_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/token-auth/"))
        .and(body_json(json!({"username": "hansi", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "user": {"first_name": "Hansi", "username": "hansi"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = http_for(&mock_server);
    let token = Authenticator::login(&http, &Credentials::new("hansi", "pw"))
        .await
        .unwrap();

    assert_eq!(token, "jwt-abc");
}

#[tokio::test]
async fn test_login_uses_access_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/token-auth/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-legacy",
            "access_token": "jwt-access",
            "refresh_token": "jwt-refresh"
        })))
        .mount(&mock_server)
        .await;

    let http = http_for(&mock_server);
    let token = Authenticator::login(&http, &Credentials::new("hansi", "pw"))
        .await
        .unwrap();

    assert_eq!(token, "jwt-access");
}

#[tokio::test]
async fn test_login_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/token-auth/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "ERROR_INVALID_CREDENTIALS"
        })))
        .mount(&mock_server)
        .await;

    let http = http_for(&mock_server);
    let err = Authenticator::login(&http, &Credentials::new("hansi", "wrong"))
        .await
        .unwrap_err();

    match err {
        Error::Auth { message } => assert!(message.contains("400")),
        other => panic!("expected Auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_login_without_token_in_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/token-auth/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {}})))
        .mount(&mock_server)
        .await;

    let http = http_for(&mock_server);
    let err = Authenticator::login(&http, &Credentials::new("hansi", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth { .. }));
}

#[tokio::test]
async fn test_login_empty_credentials_skip_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let http = http_for(&mock_server);
    let err = Authenticator::login(&http, &Credentials::new("", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth { .. }));
}

#[tokio::test]
async fn test_connect_without_credentials() {
    let mock_server = MockServer::start().await;
    let http = http_for(&mock_server);

    let auth = Authenticator::connect(&http, "db-token", None)
        .await
        .unwrap();

    assert!(!auth.has_jwt());
    assert_eq!(
        auth.authorization(AuthScheme::Token).unwrap(),
        "Token db-token"
    );
}

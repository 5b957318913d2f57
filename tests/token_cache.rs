//! Token cache behaviour against a mock OAuth2 token endpoint

use api_parity::ParityError;
use api_parity::auth::{TokenCache, TokenKey};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn key(server: &MockServer, client_id: &str) -> TokenKey {
    TokenKey {
        client_id: client_id.to_string(),
        client_secret: "s3cret".to_string(),
        token_url: format!("{}/oauth/token", server.uri()),
        grant_type: "client_credentials".to_string(),
        system_name: "MULESOFT".to_string(),
    }
}

#[tokio::test]
async fn test_second_call_with_same_key_hits_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("client_id=mule-client"))
        .and(body_string_contains("client_secret=s3cret"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-1",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cache = TokenCache::new();
    let http = reqwest::Client::new();
    let key = key(&server, "mule-client");

    let first = cache.get_token(&http, &key).await.unwrap();
    let second = cache.get_token(&http, &key).await.unwrap();

    assert_eq!(first, "tok-1");
    assert_eq!(first, second);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_distinct_keys_fetch_separately() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})))
        .expect(2)
        .mount(&server)
        .await;

    let cache = TokenCache::new();
    let http = reqwest::Client::new();

    cache.get_token(&http, &key(&server, "a")).await.unwrap();
    cache.get_token(&http, &key(&server, "b")).await.unwrap();
    cache.get_token(&http, &key(&server, "a")).await.unwrap();

    assert_eq!(cache.len().await, 2);
}

#[tokio::test]
async fn test_clear_forces_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})))
        .expect(2)
        .mount(&server)
        .await;

    let cache = TokenCache::new();
    let http = reqwest::Client::new();
    let key = key(&server, "a");

    cache.get_token(&http, &key).await.unwrap();
    cache.clear().await;
    assert!(cache.is_empty().await);
    cache.get_token(&http, &key).await.unwrap();
}

#[tokio::test]
async fn test_non_200_fails_with_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error": "invalid_client"}"#))
        .mount(&server)
        .await;

    let cache = TokenCache::new();
    let err = cache
        .get_token(&reqwest::Client::new(), &key(&server, "a"))
        .await
        .unwrap_err();

    match &err {
        ParityError::TokenRequestFailed { system, status, body } => {
            assert_eq!(system, "MULESOFT");
            assert_eq!(*status, 401);
            assert!(body.contains("invalid_client"));
        }
        other => panic!("expected token request failure, got {:?}", other),
    }
    assert!(!err.is_skip());
    assert!(cache.is_empty().await, "failures are not cached");
}

#[tokio::test]
async fn test_missing_access_token_reports_full_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "Bearer"})))
        .mount(&server)
        .await;

    let err = TokenCache::new()
        .get_token(&reqwest::Client::new(), &key(&server, "a"))
        .await
        .unwrap_err();

    match err {
        ParityError::MissingAccessToken { system, body } => {
            assert_eq!(system, "MULESOFT");
            assert!(body.contains("token_type"));
        }
        other => panic!("expected missing access token, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_200_counts_as_missing_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json at all"))
        .mount(&server)
        .await;

    let err = TokenCache::new()
        .get_token(&reqwest::Client::new(), &key(&server, "a"))
        .await
        .unwrap_err();

    assert!(matches!(err, ParityError::MissingAccessToken { .. }));
}

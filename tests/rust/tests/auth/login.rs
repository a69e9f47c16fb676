//! Explicit login

use chrono::Utc;
use druginfo_core::DrugInfoError;
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::fixtures::{self, LOGIN_PATH};
use tests::{Harness, TokenMirror};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_login_caches_and_mirrors_token() {
    let h = Harness::anonymous().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_partial_json(json!({"userId": "me@example.com", "password": "pw", "force": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "tok-1", "expiresIn": 7200})))
        .expect(1)
        .mount(&h.server)
        .await;

    let token = h.auth.login(Some("me@example.com"), Some("pw"), false).await.unwrap();

    assert_eq!(token, "tok-1");
    assert_eq!(h.auth.get_token().as_deref(), Some("tok-1"));
    assert_eq!(h.mirror.get().as_deref(), Some("tok-1"));

    let remaining = (h.auth.session().unwrap().expires_at - Utc::now()).num_seconds();
    assert!(remaining > 7000 && remaining <= 7200, "remaining = {}", remaining);
}

#[tokio::test]
async fn test_login_defaults_to_one_hour_lifetime() {
    let h = Harness::anonymous().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-2"})))
        .mount(&h.server)
        .await;

    h.auth.login(Some("u"), Some("p"), false).await.unwrap();

    let remaining = (h.auth.session().unwrap().expires_at - Utc::now()).num_seconds();
    assert!(remaining > 3500 && remaining <= 3600, "remaining = {}", remaining);
}

#[tokio::test]
async fn test_login_falls_back_to_configured_credentials() {
    let h = Harness::with_credentials().await;
    fixtures::mount_login(&h.server, "configured", 1).await;

    let token = h.auth.login(None, None, false).await.unwrap();
    assert_eq!(token, "configured");
}

#[tokio::test]
async fn test_force_flag_is_sent() {
    let h = Harness::with_credentials().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_partial_json(json!({"force": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::login_ok("forced")))
        .expect(1)
        .mount(&h.server)
        .await;

    assert_eq!(h.auth.login(None, None, true).await.unwrap(), "forced");
}

#[tokio::test]
async fn test_rejected_credentials() {
    let h = Harness::with_credentials().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    let err = h.auth.login(None, None, false).await.unwrap_err();
    assert!(matches!(err, DrugInfoError::Auth(ref msg) if msg.contains("invalid credentials")));
    assert_eq!(h.auth.get_token(), None);
}

#[tokio::test]
async fn test_response_without_token() {
    let h = Harness::with_credentials().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"user": "x"}})))
        .mount(&h.server)
        .await;

    let err = h.auth.login(None, None, false).await.unwrap_err();
    assert!(matches!(err, DrugInfoError::Auth(_)));
}

#[tokio::test]
async fn test_missing_credentials_makes_no_request() {
    let h = Harness::anonymous().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let err = h.auth.login(Some("only-user"), None, false).await.unwrap_err();
    assert!(matches!(err, DrugInfoError::Validation(_)));
}

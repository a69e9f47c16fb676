//! Exactly-once reauth-and-retry through the tools

use druginfo_core::DrugInfoError;
use druginfo_server::tools::definitions::{GET_PRODUCT, LIST_PRODUCT};
use druginfo_server::{ToolError, ToolOutput};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::fixtures::{self, LOGIN_PATH};
use tests::{args, Harness, TokenMirror};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_repeated_unauthorized_logs_in_once_and_calls_twice() {
    let h = Harness::with_credentials().await;
    fixtures::mount_login(&h.server, "fresh", 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/product"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .expect(2)
        .mount(&h.server)
        .await;

    let err = h.tools.call(LIST_PRODUCT, &args(json!({}))).await.unwrap_err();

    assert!(matches!(err, ToolError::DrugInfo(DrugInfoError::Unauthorized(_))));
    assert!(err.to_string().starts_with("Error: "));
}

#[tokio::test]
async fn test_stale_token_recovers_after_relogin() {
    let h = Harness::with_mirrored_token("stale").await;
    fixtures::mount_login(&h.server, "fresh", 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/product/P1"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/product/P1"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"productCode": "P1"}})))
        .expect(1)
        .mount(&h.server)
        .await;

    let output = h.tools.call(GET_PRODUCT, &args(json!({"code": "P1"}))).await.unwrap();

    assert_eq!(output, ToolOutput::Json(json!({"code": "P1"})));
    assert_eq!(h.mirror.get().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_unauthorized_without_credentials_retries_once_without_login() {
    let h = Harness::anonymous().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/product"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&h.server)
        .await;

    let err = h.tools.call(LIST_PRODUCT, &args(json!({}))).await.unwrap_err();
    assert!(matches!(err, ToolError::DrugInfo(DrugInfoError::Unauthorized(_))));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let h = Harness::with_credentials().await;
    fixtures::mount_login(&h.server, "unused", 0).await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/product"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h.tools.call(LIST_PRODUCT, &args(json!({}))).await.unwrap_err();
    assert!(matches!(
        err,
        ToolError::DrugInfo(DrugInfoError::Api { status: 500, ref body }) if body == "boom"
    ));
}

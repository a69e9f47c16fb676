//! Token lifecycle: auto-login, cache, mirror, clear

use pretty_assertions::assert_eq;
use tests::fixtures::{self, LOGIN_PATH};
use tests::{Harness, TokenMirror};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_auto_login_without_credentials_makes_no_request() {
    let h = Harness::anonymous().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    assert_eq!(h.auth.auto_login().await, None);
    assert_eq!(h.auth.get_token(), None);
}

#[tokio::test]
async fn test_auto_login_reuses_cached_token() {
    let h = Harness::with_credentials().await;
    fixtures::mount_login(&h.server, "cached", 1).await;

    assert_eq!(h.auth.auto_login().await.as_deref(), Some("cached"));
    assert_eq!(h.auth.auto_login().await.as_deref(), Some("cached"));
}

#[tokio::test]
async fn test_auto_login_adopts_mirrored_token() {
    let h = Harness::with_mirrored_token("from-mirror").await;
    fixtures::mount_login(&h.server, "never", 0).await;

    assert_eq!(h.auth.auto_login().await.as_deref(), Some("from-mirror"));
    assert_eq!(h.auth.session().map(|s| s.value), Some("from-mirror".to_string()));
}

#[tokio::test]
async fn test_auto_login_swallows_login_failure() {
    let h = Harness::with_credentials().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .expect(1)
        .mount(&h.server)
        .await;

    assert_eq!(h.auth.auto_login().await, None);
}

#[tokio::test]
async fn test_clear_token_removes_memory_and_mirror() {
    let h = Harness::with_credentials().await;
    fixtures::mount_login(&h.server, "to-clear", 1).await;

    h.auth.login(None, None, false).await.unwrap();
    assert_eq!(h.mirror.get().as_deref(), Some("to-clear"));

    h.auth.clear_token();
    assert_eq!(h.auth.get_token(), None);
    assert_eq!(h.mirror.get(), None);
    assert!(h.auth.session().is_none());
}

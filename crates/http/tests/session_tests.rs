//! Session lifecycle against a mock backend

mod common;

use cockpit_core::KeyValueStorage;
use cockpit_http::{SessionState, SessionStore, TOKEN_STORAGE_KEY};
use common::{Harness, builder};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_login(h: &Harness) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "alice", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"token": "tok123", "username": "alice"},
            "message": "登录成功"
        })))
        .expect(1)
        .mount(&h.server)
        .await;
}

#[tokio::test]
async fn test_login_stores_token() {
    let h = Harness::start().await;
    mount_login(&h).await;

    let response = h.session.login(&h.client, "alice", "secret").await.unwrap();
    assert_eq!(response.token, "tok123");

    assert_eq!(h.session.state(), SessionState::Authenticated);
    assert_eq!(h.session.token().as_deref(), Some("tok123"));
    assert_eq!(h.session.user().display_name, "alice");
    assert_eq!(
        h.storage.get_item(TOKEN_STORAGE_KEY).unwrap().as_deref(),
        Some("tok123")
    );

    let requests = h.server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_login_without_username_keeps_given_name() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": {"token": "t"}})),
        )
        .mount(&h.server)
        .await;

    h.session.login(&h.client, "root", "pw").await.unwrap();
    assert_eq!(h.session.user().display_name, "root");
}

#[tokio::test]
async fn test_session_survives_restart() {
    let h = Harness::start().await;
    mount_login(&h).await;
    h.session.login(&h.client, "alice", "secret").await.unwrap();

    let restored = Arc::new(SessionStore::load(h.storage.clone()).unwrap());
    assert_eq!(restored.state(), SessionState::Authenticated);
    assert_eq!(restored.token().as_deref(), Some("tok123"));

    Mock::given(method("GET"))
        .and(path("/api/birthday/today"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": []})))
        .expect(1)
        .mount(&h.server)
        .await;

    let client = builder(&h.server, h.notifier.clone())
        .build_authenticated(restored)
        .unwrap();
    let today = client.birthday().get_today_birthdays().await.unwrap();
    assert!(today.is_empty());
}

#[tokio::test]
async fn test_rejected_login_leaves_session_anonymous() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "用户名或密码错误"})),
        )
        .mount(&h.server)
        .await;

    let err = h.session.login(&h.client, "alice", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "用户名或密码错误");

    assert_eq!(h.session.state(), SessionState::Anonymous);
    assert_eq!(h.storage.get_item(TOKEN_STORAGE_KEY).unwrap(), None);
    assert_eq!(h.notifier.messages(), vec!["用户名或密码错误"]);
}

#[tokio::test]
async fn test_logout_clears_everything_and_repeats() {
    let h = Harness::start().await;
    mount_login(&h).await;
    h.session.login(&h.client, "alice", "secret").await.unwrap();

    h.session.logout();
    h.session.logout();

    let session = h.session.snapshot();
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.user.display_name.is_empty());
    assert!(session.user.avatar.is_empty());
    assert_eq!(h.storage.get_item(TOKEN_STORAGE_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_refresh_user_updates_display_info() {
    let h = Harness::with_token(Some("tok123")).await;

    Mock::given(method("GET"))
        .and(path("/api/auth/info"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"username": "admin", "avatar": "https://example.com/a.png"}
        })))
        .mount(&h.server)
        .await;

    let info = h.session.refresh_user(&h.client).await.unwrap();
    assert_eq!(info.username, "admin");

    let user = h.session.user();
    assert_eq!(user.display_name, "admin");
    assert_eq!(user.avatar, "https://example.com/a.png");
}

#[tokio::test]
async fn test_concurrent_calls_settle_independently() {
    let h = Harness::with_token(Some("tok123")).await;

    Mock::given(method("GET"))
        .and(path("/api/message/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"by_source": {"wecom": 1}, "today": 1}
        })))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/birthday/today"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&h.server)
        .await;

    let message = h.client.message();
    let birthday = h.client.birthday();
    let (stats, today) = tokio::join!(message.stats(), birthday.get_today_birthdays());

    assert_eq!(stats.unwrap().today, 1);
    assert_eq!(today.unwrap_err().to_string(), "boom");
    assert_eq!(h.notifier.messages(), vec!["boom"]);
}

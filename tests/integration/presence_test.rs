//! Integration tests for online presence under both policies.

mod helpers;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;
use socialhub_core::traits::TTL_MISSING;
use socialhub_presence::PolicyKind;

#[tokio::test(start_paused = true)]
async fn test_logged_in_user_goes_offline_when_token_expires() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    app.befriend(&ann, &ben).await;

    assert!(!app.online_as_seen_by(&ann, ben.id).await);

    let short = app.token_expiring_in(ben.id, 5);
    let response = app
        .request("GET", &format!("/v1/users/{}", ben.id), None, Some(&short))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(app.online_as_seen_by(&ann, ben.id).await);

    tokio::time::advance(Duration::from_secs(6)).await;
    assert!(!app.online_as_seen_by(&ann, ben.id).await);
}

#[tokio::test]
async fn test_presence_ttl_follows_token_lifetime() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;

    app.request("GET", &format!("/v1/users/{}", ann.id), None, Some(&ann.access))
        .await;

    let ttl = app.presence_ttl(ann.id).await;
    let access_ttl = (app.state.config.auth.jwt_access_ttl_minutes * 60) as i64;
    assert!(ttl > access_ttl - 5 && ttl <= access_ttl, "ttl = {ttl}");
}

#[tokio::test]
async fn test_ui_open_flag_controls_presence() {
    let app = TestApp::with_policy(PolicyKind::UiOpenIsOnline);
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    app.befriend(&ann, &ben).await;

    app.request("GET", &format!("/v1/users/{}", ben.id), None, Some(&ben.access))
        .await;
    assert!(app.online_as_seen_by(&ann, ben.id).await);

    let response = app
        .request(
            "POST",
            &format!("/v1/users/{}/ui_online_status", ben.id),
            Some(json!({ "ui_open": false })),
            Some(&ben.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(!app.online_as_seen_by(&ann, ben.id).await);

    // Any authenticated request marks the UI as open again.
    app.request("GET", &format!("/v1/users/{}", ben.id), None, Some(&ben.access))
        .await;
    assert!(app.online_as_seen_by(&ann, ben.id).await);

    let response = app
        .request(
            "POST",
            &format!("/v1/users/{}/ui_online_status", ben.id),
            Some(json!({ "ui_open": false })),
            Some(&ben.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(!app.online_as_seen_by(&ann, ben.id).await);

    let response = app
        .request(
            "POST",
            &format!("/v1/users/{}/ui_online_status", ben.id),
            Some(json!({ "ui_open": true })),
            Some(&ben.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(app.online_as_seen_by(&ann, ben.id).await);
}

#[tokio::test]
async fn test_ui_status_refused_under_logged_in_policy() {
    let app = TestApp::new();
    let ben = app.register("Ben", "Baker").await;

    let response = app
        .request(
            "POST",
            &format!("/v1/users/{}/ui_online_status", ben.id),
            Some(json!({ "ui_open": true })),
            Some(&ben.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body["error"], "METHOD_NOT_ALLOWED");

    assert_eq!(app.presence_ttl(ben.id).await, TTL_MISSING);
}

#[tokio::test]
async fn test_ui_status_policy_check_precedes_body_and_owner() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;

    let response = app
        .raw_request(
            "POST",
            &format!("/v1/users/{}/ui_online_status", ann.id),
            Some("{not json".to_string()),
            Some(&ben.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_ui_status_validation_under_ui_open_policy() {
    let app = TestApp::with_policy(PolicyKind::UiOpenIsOnline);
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    let path = format!("/v1/users/{}/ui_online_status", ben.id);

    let anonymous = app
        .request("POST", &path, Some(json!({ "ui_open": true })), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let malformed = app
        .request("POST", &path, Some(json!({ "ui_open": "maybe" })), Some(&ben.access))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let someone_else = app
        .request("POST", &path, Some(json!({ "ui_open": true })), Some(&ann.access))
        .await;
    assert_eq!(someone_else.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_policy_switch_takes_effect_immediately() {
    let app = TestApp::new();
    let ben = app.register("Ben", "Baker").await;
    let path = format!("/v1/users/{}/ui_online_status", ben.id);

    let refused = app
        .request("POST", &path, Some(json!({ "ui_open": true })), Some(&ben.access))
        .await;
    assert_eq!(refused.status, StatusCode::METHOD_NOT_ALLOWED);

    app.switch_policy(PolicyKind::UiOpenIsOnline);

    let accepted = app
        .request("POST", &path, Some(json!({ "ui_open": true })), Some(&ben.access))
        .await;
    assert_eq!(accepted.status, StatusCode::NO_CONTENT);

    let health = app.request("GET", "/v1/health", None, None).await;
    assert_eq!(health.body["presence_policy"], "UIOpenIsOnline");
}

#[tokio::test]
async fn test_store_outage_degrades_presence_without_blocking_requests() {
    let app = TestApp::with_policy(PolicyKind::UiOpenIsOnline);
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    app.befriend(&ann, &ben).await;

    app.store.break_hashes();

    let profile = app
        .request("GET", &format!("/v1/users/{}", ben.id), None, Some(&ben.access))
        .await;
    assert_eq!(profile.status, StatusCode::OK);

    assert!(!app.online_as_seen_by(&ann, ben.id).await);

    let response = app
        .request(
            "POST",
            &format!("/v1/users/{}/ui_online_status", ben.id),
            Some(json!({ "ui_open": true })),
            Some(&ben.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);

    let health = app.request("GET", "/v1/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "degraded");
    assert_eq!(health.body["store"], false);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_store_does_not_hang_authenticated_requests() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;

    app.store.stall();

    let profile = tokio::time::timeout(
        Duration::from_secs(2),
        app.request("GET", &format!("/v1/users/{}", ann.id), None, Some(&ann.access)),
    )
    .await
    .expect("request hung on a stalled store");
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["id"], json!(ann.id));

    let health = tokio::time::timeout(
        Duration::from_secs(2),
        app.request("GET", "/v1/health", None, None),
    )
    .await
    .expect("health check hung on a stalled store");
    assert_eq!(health.body["status"], "degraded");
}

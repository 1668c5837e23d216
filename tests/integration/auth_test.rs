//! Integration tests for sign-up, confirmation, login, refresh and logout.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp, TestResponse};

#[tokio::test]
async fn test_sign_up_returns_inactive_user_and_pin() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/v1/auth/sign_up",
            Some(json!({
                "email": "Ann@SocialHub.test",
                "first_name": "Ann",
                "last_name": "Archer",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["email"], "ann@socialhub.test");
    assert_eq!(response.body["is_active"], false);
    let pin = response.body["confirmation_pin"].as_str().unwrap();
    assert_eq!(pin.len(), 4);
    assert!(pin.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.sign_up("Ann", "Archer").await;

    let response = app
        .request(
            "POST",
            "/v1/auth/sign_up",
            Some(json!({
                "email": "ANN@socialhub.test",
                "first_name": "Annie",
                "last_name": "Archer",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_sign_up_rejects_bad_input() {
    let app = TestApp::new();

    let bad_email = app
        .request(
            "POST",
            "/v1/auth/sign_up",
            Some(json!({
                "email": "not-an-email",
                "first_name": "Ann",
                "last_name": "Archer",
                "password": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let weak_password = app
        .request(
            "POST",
            "/v1/auth/sign_up",
            Some(json!({
                "email": "ann@socialhub.test",
                "first_name": "Ann",
                "last_name": "Archer",
                "password": "12345678",
            })),
            None,
        )
        .await;
    assert_eq!(weak_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(weak_password.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unconfirmed_user_cannot_log_in() {
    let app = TestApp::new();
    app.sign_up("Ann", "Archer").await;

    let response = app
        .request(
            "POST",
            "/v1/auth/token",
            Some(json!({ "email": "ann@socialhub.test", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNCONFIRMED_USER");
}

#[tokio::test]
async fn test_wrong_pin_is_rejected_and_right_pin_is_single_use() {
    let app = TestApp::new();
    let (id, pin) = app.sign_up("Ann", "Archer").await;
    let wrong = if pin == "0123" { "3210" } else { "0123" };

    let response = app
        .request(
            "POST",
            &format!("/v1/auth/confirm/{id}"),
            Some(json!({ "pin": wrong })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            &format!("/v1/auth/confirm/{id}"),
            Some(json!({ "pin": pin })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["access"].is_string());
    assert!(response.body["refresh"].is_string());

    let response = app
        .request(
            "POST",
            &format!("/v1/auth/confirm/{id}"),
            Some(json!({ "pin": pin })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_after_confirmation() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;

    let response = app
        .request(
            "POST",
            "/v1/auth/token",
            Some(json!({ "email": "ann@socialhub.test", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let access = response.body["access"].as_str().unwrap();
    let profile = app
        .request("GET", &format!("/v1/users/{}", ann.id), None, Some(access))
        .await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["is_active"], true);

    let wrong = app
        .request(
            "POST",
            "/v1/auth/token",
            Some(json!({ "email": "ann@socialhub.test", "password": "Wrong-Lantern-1" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;

    let response = app
        .request(
            "POST",
            "/v1/auth/token/refresh",
            Some(json!({ "refresh": ann.refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("refresh").is_none());

    let access = response.body["access"].as_str().unwrap();
    let profile = app
        .request("GET", &format!("/v1/users/{}", ann.id), None, Some(access))
        .await;
    assert_eq!(profile.status, StatusCode::OK);

    let access_as_refresh = app
        .request(
            "POST",
            "/v1/auth/token/refresh",
            Some(json!({ "refresh": ann.access })),
            None,
        )
        .await;
    assert_eq!(access_as_refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;

    let response = app
        .request("POST", "/v1/auth/logout", None, Some(&ann.access))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("GET", &format!("/v1/users/{}", ann.id), None, Some(&ann.access))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_credentials() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;

    let missing = app
        .request("GET", &format!("/v1/users/{}", ann.id), None, None)
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", &format!("/v1/users/{}", ann.id), None, Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_up_is_undone_when_pin_cannot_be_stored() {
    let app = TestApp::new();
    let body = json!({
        "email": "ann@socialhub.test",
        "first_name": "Ann",
        "last_name": "Archer",
        "password": PASSWORD,
    });

    app.store.break_scalars();
    let failed = app
        .request("POST", "/v1/auth/sign_up", Some(body.clone()), None)
        .await;
    assert_eq!(failed.status, StatusCode::INTERNAL_SERVER_ERROR);

    app.store.restore();
    let retried = app
        .request("POST", "/v1/auth/sign_up", Some(body), None)
        .await;
    assert_eq!(retried.status, StatusCode::CREATED, "{:?}", retried.body);
}

#[tokio::test]
async fn test_resend_pin_for_unconfirmed_account() {
    let app = TestApp::new();
    let (id, first_pin) = app.sign_up("Ann", "Archer").await;
    assert_eq!(resend_pin(&app, "wrong-password").await.status, StatusCode::UNAUTHORIZED);

    let response = resend_pin(&app, PASSWORD).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], json!(id));
    let pin = response.body["confirmation_pin"].as_str().unwrap().to_string();

    if pin != first_pin {
        let stale = app
            .request(
                "POST",
                &format!("/v1/auth/confirm/{id}"),
                Some(json!({ "pin": first_pin })),
                None,
            )
            .await;
        assert_eq!(stale.status, StatusCode::BAD_REQUEST);
    }

    let confirmed = app
        .request(
            "POST",
            &format!("/v1/auth/confirm/{id}"),
            Some(json!({ "pin": pin })),
            None,
        )
        .await;
    assert_eq!(confirmed.status, StatusCode::OK);

    assert_eq!(resend_pin(&app, PASSWORD).await.status, StatusCode::CONFLICT);
}

async fn resend_pin(app: &TestApp, password: &str) -> TestResponse {
    app.request(
        "POST",
        "/v1/auth/resend_pin",
        Some(json!({ "email": "ann@socialhub.test", "password": password })),
        None,
    )
    .await
}

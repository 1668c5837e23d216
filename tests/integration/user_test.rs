//! Integration tests for profiles and friendships.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::TestApp;

#[tokio::test]
async fn test_profile_lists_friends_both_ways() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    let cat = app.register("Cat", "Carter").await;

    let response = app
        .request(
            "POST",
            &format!("/v1/users/{}/add_friends", ann.id),
            Some(json!({ "friends": [ben.id, cat.id, ben.id, ann.id] })),
            Some(&ann.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 2);

    let profile = app
        .request("GET", &format!("/v1/users/{}", ben.id), None, Some(&ann.access))
        .await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["first_name"], "Ben");
    let friends = profile.body["friends"].as_array().unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0]["id"], json!(ann.id));
}

#[tokio::test]
async fn test_friend_list_reports_online_flags() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    let cat = app.register("Cat", "Carter").await;
    app.befriend(&ann, &ben).await;
    app.befriend(&ann, &cat).await;

    app.request("GET", &format!("/v1/users/{}", cat.id), None, Some(&cat.access))
        .await;

    assert!(!app.online_as_seen_by(&ann, ben.id).await);
    assert!(app.online_as_seen_by(&ann, cat.id).await);
}

#[tokio::test]
async fn test_add_friends_for_someone_else_is_forbidden() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    let cat = app.register("Cat", "Carter").await;

    let response = app
        .request(
            "POST",
            &format!("/v1/users/{}/add_friends", ben.id),
            Some(json!({ "friends": [cat.id] })),
            Some(&ann.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_add_friends_rejects_bad_input() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let path = format!("/v1/users/{}/add_friends", ann.id);

    let unknown = app
        .request(
            "POST",
            &path,
            Some(json!({ "friends": [Uuid::new_v4()] })),
            Some(&ann.access),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);

    let empty = app
        .request("POST", &path, Some(json!({ "friends": [] })), Some(&ann.access))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_and_malformed_user_ids() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;

    let unknown = app
        .request("GET", &format!("/v1/users/{}", Uuid::new_v4()), None, Some(&ann.access))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request("GET", "/v1/users/not-a-uuid", None, Some(&ann.access))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/v1/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], true);
    assert_eq!(response.body["presence_policy"], "LoggedInIsOnline");
}

#[tokio::test]
async fn test_user_list_is_paginated_with_link_headers() {
    let app = TestApp::new();
    let names = [
        "Ann", "Ben", "Cat", "Dan", "Eve", "Fay", "Gus", "Hal", "Ivy", "Jon", "Kim", "Lou",
    ];
    let mut users = Vec::new();
    for name in names {
        users.push(app.register(name, "Tester").await);
    }
    let viewer = &users[0];

    let first = app.request("GET", "/v1/users", None, Some(&viewer.access)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body.as_array().unwrap().len(), 10);
    assert_eq!(first.headers["count"], "12");
    assert_eq!(first.headers["next"], "/v1/users?page=2&page_size=10");
    assert!(first.headers.get("previous").is_none());

    let second = app
        .request("GET", "/v1/users?page=2", None, Some(&viewer.access))
        .await;
    assert_eq!(second.body.as_array().unwrap().len(), 2);
    assert!(second.headers.get("next").is_none());
    assert_eq!(second.headers["previous"], "/v1/users?page=1&page_size=10");

    let bad = app
        .request("GET", "/v1/users?page=first", None, Some(&viewer.access))
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_friend_list_is_paginated() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    let cat = app.register("Cat", "Carter").await;
    app.befriend(&ann, &ben).await;
    app.befriend(&ann, &cat).await;

    let response = app
        .request(
            "GET",
            &format!("/v1/users/{}/friends?page_size=1&page=2", ann.id),
            None,
            Some(&ann.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers["count"], "2");
    let friends = response.body.as_array().unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0]["id"], json!(cat.id));
}

#[tokio::test]
async fn test_search_friends_by_name() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    let cat = app.register("Cat", "Carter").await;
    app.register("Bea", "Stranger").await;
    app.befriend(&ann, &ben).await;
    app.befriend(&ann, &cat).await;
    let path = format!("/v1/users/{}/search", ann.id);

    let by_first = app
        .request("GET", &format!("{path}?name=bE"), None, Some(&ann.access))
        .await;
    assert_eq!(by_first.status, StatusCode::OK);
    let found = by_first.body.as_array().unwrap();
    assert_eq!(found.len(), 1, "only friends are searched");
    assert_eq!(found[0]["id"], json!(ben.id));

    let by_last = app
        .request("GET", &format!("{path}?name=CARTER"), None, Some(&ann.access))
        .await;
    assert_eq!(by_last.body[0]["id"], json!(cat.id));

    let missing = app.request("GET", &path, None, Some(&ann.access)).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_own_account_only() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    app.befriend(&ann, &ben).await;

    let forbidden = app
        .request("DELETE", &format!("/v1/users/{}", ann.id), None, Some(&ben.access))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = app
        .request("DELETE", &format!("/v1/users/{}", ann.id), None, Some(&ann.access))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", &format!("/v1/users/{}", ann.id), None, Some(&ben.access))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let profile = app
        .request("GET", &format!("/v1/users/{}", ben.id), None, Some(&ben.access))
        .await;
    assert!(profile.body["friends"].as_array().unwrap().is_empty());

    let stale_token = app
        .request("GET", &format!("/v1/users/{}", ben.id), None, Some(&ann.access))
        .await;
    assert_eq!(stale_token.status, StatusCode::UNAUTHORIZED);
}

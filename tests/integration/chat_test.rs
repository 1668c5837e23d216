//! Integration tests for direct messages.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_friends_exchange_chats() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    app.befriend(&ann, &ben).await;

    let sent = app
        .request(
            "POST",
            "/v1/chats",
            Some(json!({ "receiver": ben.id, "message": "Lunch?" })),
            Some(&ann.access),
        )
        .await;
    assert_eq!(sent.status, StatusCode::CREATED, "{:?}", sent.body);
    assert_eq!(sent.body["sender"], "Ann Archer");
    assert_eq!(sent.body["receiver"], "Ben Baker");
    assert_eq!(sent.body["location"], json!(null));

    let reply = app
        .request(
            "POST",
            "/v1/chats",
            Some(json!({
                "receiver": ann.id,
                "respond_to": sent.body["id"],
                "location": "https://maps.example.com/?q=canteen",
            })),
            Some(&ben.access),
        )
        .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    assert_eq!(reply.body["respond_to"], sent.body["id"]);

    let listed = app.request("GET", "/v1/chats", None, Some(&ann.access)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.headers["count"], "2");
    assert_eq!(listed.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_chat_rules() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    let cat = app.register("Cat", "Carter").await;
    app.befriend(&ann, &ben).await;

    let cases = [
        json!({ "receiver": cat.id, "message": "hi" }),
        json!({ "receiver": ben.id }),
        json!({ "receiver": ben.id, "message": "a".repeat(501) }),
        json!({ "receiver": ben.id, "location": "not a url" }),
        json!({ "receiver": ben.id, "message": "hi", "respond_to": ann.id }),
        json!({ "message": "hi" }),
    ];
    for body in cases {
        let response = app
            .request("POST", "/v1/chats", Some(body.clone()), Some(&ann.access))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
    }

    let anonymous = app
        .request("POST", "/v1/chats", Some(json!({ "receiver": ben.id, "message": "hi" })), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_only_participants_can_delete_a_chat() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    let cat = app.register("Cat", "Carter").await;
    app.befriend(&ann, &ben).await;

    let sent = app
        .request(
            "POST",
            "/v1/chats",
            Some(json!({ "receiver": ben.id, "message": "psst" })),
            Some(&ann.access),
        )
        .await;
    let path = format!("/v1/chats/{}", sent.body["id"].as_str().unwrap());

    let outsider = app.request("DELETE", &path, None, Some(&cat.access)).await;
    assert_eq!(outsider.status, StatusCode::NOT_FOUND);
    let outsider_list = app.request("GET", "/v1/chats", None, Some(&cat.access)).await;
    assert!(outsider_list.body.as_array().unwrap().is_empty());

    let deleted = app.request("DELETE", &path, None, Some(&ben.access)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let again = app.request("DELETE", &path, None, Some(&ann.access)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_an_account_cleans_up_its_chats() {
    let app = TestApp::new();
    let ann = app.register("Ann", "Archer").await;
    let ben = app.register("Ben", "Baker").await;
    app.befriend(&ann, &ben).await;

    for (from, to) in [(&ann, &ben), (&ben, &ann)] {
        let response = app
            .request(
                "POST",
                "/v1/chats",
                Some(json!({ "receiver": to.id, "message": "hello" })),
                Some(&from.access),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let deleted = app
        .request("DELETE", &format!("/v1/users/{}", ann.id), None, Some(&ann.access))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let left = app.request("GET", "/v1/chats", None, Some(&ben.access)).await;
    let chats = left.body.as_array().unwrap();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0]["sender"], "Ben Baker");
    assert_eq!(chats[0]["receiver"], json!(null));
}

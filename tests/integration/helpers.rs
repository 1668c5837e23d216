//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use socialhub_api::AppState;
use socialhub_api::router::build_router;
use socialhub_auth::{InMemoryUserDirectory, JwtEncoder, TokenType};
use socialhub_cache::keys;
use socialhub_cache::memory::MemoryStore;
use socialhub_core::config::AppConfig;
use socialhub_core::error::AppError;
use socialhub_core::result::AppResult;
use socialhub_core::traits::KeyValueStore;
use socialhub_service::InMemoryChatStore;
use socialhub_presence::PolicyKind;

/// Password accepted by the default policy for every test user.
pub const PASSWORD: &str = "Gr33n-Lantern-Harbor!";

/// In-memory store that can be made to fail or hang on demand.
///
/// Presence lives in hashes while PINs and the token blocklist are scalars,
/// so turning hashes off simulates a presence outage without breaking login.
#[derive(Debug)]
pub struct FlakyStore {
    inner: MemoryStore,
    hashes_down: AtomicBool,
    scalars_down: AtomicBool,
    stalled: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(3600),
            hashes_down: AtomicBool::new(false),
            scalars_down: AtomicBool::new(false),
            stalled: AtomicBool::new(false),
        }
    }

    /// Make every hash operation fail from now on.
    pub fn break_hashes(&self) {
        self.hashes_down.store(true, Ordering::SeqCst);
    }

    /// Make every scalar operation fail from now on.
    pub fn break_scalars(&self) {
        self.scalars_down.store(true, Ordering::SeqCst);
    }

    /// Make every operation wait forever from now on.
    pub fn stall(&self) {
        self.stalled.store(true, Ordering::SeqCst);
    }

    /// Undo every failure switch.
    pub fn restore(&self) {
        for flag in [&self.hashes_down, &self.scalars_down, &self.stalled] {
            flag.store(false, Ordering::SeqCst);
        }
    }

    async fn scalar(&self) -> AppResult<()> {
        self.gate(&self.scalars_down).await
    }

    async fn hash(&self) -> AppResult<()> {
        self.gate(&self.hashes_down).await
    }

    async fn gate(&self, down: &AtomicBool) -> AppResult<()> {
        if self.stalled.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if down.load(Ordering::SeqCst) {
            Err(AppError::cache("Connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.scalar().await?;
        self.inner.set(key, value, ttl).await
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.scalar().await?;
        self.inner.set_default(key, value).await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.scalar().await?;
        self.inner.get(key).await
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool> {
        self.scalar().await?;
        self.inner.compare_and_delete(key, expected).await
    }

    async fn hash_set(
        &self,
        name: &str,
        field: &str,
        value: &str,
        other_fields: &[(&str, &str)],
        ttl: Option<Duration>,
    ) -> AppResult<()> {
        self.hash().await?;
        self.inner.hash_set(name, field, value, other_fields, ttl).await
    }

    async fn hash_get(&self, name: &str, field: &str) -> AppResult<Option<String>> {
        self.hash().await?;
        self.inner.hash_get(name, field).await
    }

    async fn time_to_live(&self, key: &str) -> AppResult<i64> {
        self.hash().await?;
        self.inner.time_to_live(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.hash().await?;
        self.inner.health_check().await
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared application state
    pub state: AppState,
    /// The store behind presence, PINs and the blocklist
    pub store: Arc<FlakyStore>,
    /// Token signer using the app's secret
    pub encoder: JwtEncoder,
}

/// A confirmed user with a token pair.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub access: String,
    pub refresh: String,
}

impl TestApp {
    /// Create a new test application with `LoggedInIsOnline`
    pub fn new() -> Self {
        Self::with_policy(PolicyKind::LoggedInIsOnline)
    }

    /// Create a new test application with the given presence policy
    pub fn with_policy(policy: PolicyKind) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.presence.policy = policy.as_str().to_string();
        config.validate().expect("Invalid test config");

        let store = Arc::new(FlakyStore::new());
        let encoder = JwtEncoder::new(&config.auth);
        let state = AppState::assemble(
            config,
            store.clone(),
            Arc::new(InMemoryUserDirectory::new()),
            Arc::new(InMemoryChatStore::new()),
        )
        .expect("Failed to assemble app state");

        Self {
            router: build_router(state.clone()),
            state,
            store,
            encoder,
        }
    }

    /// Switch the active presence policy at runtime
    pub fn switch_policy(&self, policy: PolicyKind) {
        self.state.presence.selector().switch(policy);
    }

    /// Sign up and return the new user's ID and confirmation PIN
    pub async fn sign_up(&self, first_name: &str, last_name: &str) -> (Uuid, String) {
        let response = self
            .request(
                "POST",
                "/v1/auth/sign_up",
                Some(json!({
                    "email": format!("{}@socialhub.test", first_name.to_lowercase()),
                    "first_name": first_name,
                    "last_name": last_name,
                    "password": PASSWORD,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Sign up failed: {:?}",
            response.body
        );

        let id = response.body["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No id in sign up response");
        let pin = response.body["confirmation_pin"]
            .as_str()
            .expect("No confirmation_pin in sign up response")
            .to_string();
        (id, pin)
    }

    /// Sign up and confirm a user
    pub async fn register(&self, first_name: &str, last_name: &str) -> TestUser {
        let (id, pin) = self.sign_up(first_name, last_name).await;

        let response = self
            .request(
                "POST",
                &format!("/v1/auth/confirm/{id}"),
                Some(json!({ "pin": pin })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Confirmation failed: {:?}",
            response.body
        );

        TestUser {
            id,
            access: response.body["access"].as_str().expect("No access token").to_string(),
            refresh: response.body["refresh"].as_str().expect("No refresh token").to_string(),
        }
    }

    /// Access token for `user_id` that expires `seconds` from now
    pub fn token_expiring_in(&self, user_id: Uuid, seconds: i64) -> String {
        self.encoder
            .issue(user_id, TokenType::Access, chrono::Duration::seconds(seconds))
            .expect("Failed to issue token")
            .0
    }

    /// Make `a` and `b` friends
    pub async fn befriend(&self, a: &TestUser, b: &TestUser) {
        let response = self
            .request(
                "POST",
                &format!("/v1/users/{}/add_friends", a.id),
                Some(json!({ "friends": [b.id] })),
                Some(&a.access),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }

    /// Online flag of `friend` as seen in `viewer`'s friend list
    pub async fn online_as_seen_by(&self, viewer: &TestUser, friend: Uuid) -> bool {
        let response = self
            .request(
                "GET",
                &format!("/v1/users/{}/friends", viewer.id),
                None,
                Some(&viewer.access),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

        response
            .body
            .as_array()
            .expect("Friend list is not an array")
            .iter()
            .find(|f| f["id"] == json!(friend))
            .and_then(|f| f["online"].as_bool())
            .expect("Friend not in list")
    }

    /// Remaining TTL of a user's presence record
    pub async fn presence_ttl(&self, user_id: Uuid) -> i64 {
        self.store
            .inner
            .time_to_live(&keys::presence(user_id))
            .await
            .expect("TTL lookup failed")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.raw_request(
            method,
            path,
            body.map(|b| serde_json::to_string(&b).expect("Failed to serialize body")),
            token,
        )
        .await
    }

    /// Make an HTTP request with a verbatim body
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body.unwrap_or_default()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /v1/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.presence.store_healthy().await;

    Json(HealthResponse {
        status: if store { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store,
        presence_policy: state.presence.active_kind().to_string(),
    })
}

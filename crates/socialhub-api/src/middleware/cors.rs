//! CORS layer for browser clients.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use socialhub_core::config::CorsConfig;

use crate::extractors::pagination::{COUNT_HEADER, NEXT_HEADER, PREVIOUS_HEADER};

/// Builds the CORS layer. Origins that do not parse are skipped.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .expose_headers([COUNT_HEADER, NEXT_HEADER, PREVIOUS_HEADER].map(HeaderName::from_static))
        .max_age(Duration::from_secs(config.max_age_seconds))
}

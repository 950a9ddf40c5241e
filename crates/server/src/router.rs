//! HTTP router construction.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/health", get(api::health))
        // /conditions/validate MUST stay a literal route next to the collection
        .route(
            "/conditions",
            get(api::conditions_list).post(api::conditions_create),
        )
        .route("/conditions/validate", post(api::conditions_validate))
        .route(
            "/loggings",
            get(api::loggings_list).post(api::loggings_record),
        )
        .route("/events", get(api::events_list).post(api::events_create))
        .route(
            "/events/{id}",
            get(api::events_get).put(api::events_update),
        )
        .route("/events/{id}/rewards", put(api::events_set_rewards))
        .route(
            "/events/{id}/reward-requests",
            post(api::reward_requests_create),
        )
        .route("/reward-requests", get(api::reward_requests_list))
        .route("/reward-requests/{id}", get(api::reward_requests_get))
        .route(
            "/reward-requests/{id}/approve",
            post(api::reward_requests_approve),
        )
        .route(
            "/reward-requests/{id}/reject",
            post(api::reward_requests_reject),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            warn!(origin, "invalid CORS_ORIGIN, allowing any origin");
            CorsLayer::permissive()
        }
    }
}

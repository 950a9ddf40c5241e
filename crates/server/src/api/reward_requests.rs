//! Reward request endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use questline_events::{RewardRequest, RewardRequestQuery};

use crate::state::AppState;

use super::{acting_user, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct RejectBody {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request the event's rewards for the acting user.
pub async fn reward_requests_create(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<(StatusCode, Json<RewardRequest>)> {
    let user = acting_user(&headers)?;
    let request = state.hub.requests.request(&user, &event_id).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn reward_requests_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RewardRequestQuery>,
) -> Json<Vec<RewardRequest>> {
    Json(state.hub.requests.list(&query).await)
}

pub async fn reward_requests_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<RewardRequest>> {
    Ok(Json(state.hub.requests.find(&id).await?))
}

pub async fn reward_requests_approve(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<RewardRequest>> {
    let user = acting_user(&headers)?;
    Ok(Json(state.hub.requests.approve(&user, &id).await?))
}

pub async fn reward_requests_reject(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<RejectBody>,
) -> ApiResult<Json<RewardRequest>> {
    let user = acting_user(&headers)?;
    Ok(Json(state.hub.requests.reject(&user, &id, body.reason).await?))
}

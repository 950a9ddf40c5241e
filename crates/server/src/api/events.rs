//! Event endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use questline_core::Reward;
use questline_events::{CreateEventInput, Event, EventQuery, UpdateEventInput};

use crate::state::AppState;

use super::{acting_user, ApiResult};

pub async fn events_create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<CreateEventInput>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let user = acting_user(&headers)?;
    let event = state.hub.events.create(&user, input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn events_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventQuery>,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(state.hub.events.list(&query).await?))
}

pub async fn events_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Event>> {
    Ok(Json(state.hub.events.find(&id).await?))
}

pub async fn events_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<UpdateEventInput>,
) -> ApiResult<Json<Event>> {
    let user = acting_user(&headers)?;
    Ok(Json(state.hub.events.update(&user, &id, input).await?))
}

pub async fn events_set_rewards(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(rewards): Json<Vec<Reward>>,
) -> ApiResult<Json<Event>> {
    let user = acting_user(&headers)?;
    Ok(Json(state.hub.events.set_rewards(&user, &id, rewards).await?))
}

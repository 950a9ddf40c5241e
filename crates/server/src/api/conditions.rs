//! Condition definition endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use questline_core::ConditionDefinition;
use questline_events::DefineConditionInput;
use questline_rules::{ConditionTreeValidator, ValidationResult};

use crate::state::AppState;

use super::{acting_user, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionsParams {
    pub display_name: Option<String>,
}

pub async fn conditions_create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<DefineConditionInput>,
) -> ApiResult<(StatusCode, Json<ConditionDefinition>)> {
    let user = acting_user(&headers)?;
    let definition = state.hub.catalog.define(&user, input).await?;
    Ok((StatusCode::CREATED, Json(definition)))
}

pub async fn conditions_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConditionsParams>,
) -> Json<Vec<ConditionDefinition>> {
    Json(state.hub.catalog.list(params.display_name.as_deref()).await)
}

/// Check an arbitrary JSON document as a condition tree against every
/// defined condition. Always 200; validity is in the body.
pub async fn conditions_validate(
    State(state): State<Arc<AppState>>,
    Json(document): Json<serde_json::Value>,
) -> Json<ValidationResult> {
    let definitions = state.hub.catalog.list(None).await;
    Json(ConditionTreeValidator::check_json(&document, &definitions))
}

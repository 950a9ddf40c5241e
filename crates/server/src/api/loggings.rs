//! User behavior log endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use questline_core::LoggedEvent;
use questline_events::{LogQuery, RecordLogInput};

use crate::state::AppState;

use super::ApiResult;

/// Query string for GET /loggings; `fieldNames` is comma separated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingsParams {
    pub user_id: Option<String>,
    pub field_names: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl From<LoggingsParams> for LogQuery {
    fn from(params: LoggingsParams) -> Self {
        LogQuery {
            user_id: params.user_id,
            field_names: params
                .field_names
                .map(|names| {
                    names
                        .split(',')
                        .map(str::trim)
                        .filter(|n| !n.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            started_at: params.started_at,
            ended_at: params.ended_at,
        }
    }
}

pub async fn loggings_record(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RecordLogInput>,
) -> ApiResult<(StatusCode, Json<LoggedEvent>)> {
    let log = state.hub.logging.record(input).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn loggings_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LoggingsParams>,
) -> Json<Vec<LoggedEvent>> {
    Json(state.hub.logging.query(&params.into()).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_split_on_commas() {
        let query: LogQuery = LoggingsParams {
            field_names: Some("login_streak, membership_tier,,".to_string()),
            ..Default::default()
        }
        .into();
        assert_eq!(query.field_names, vec!["login_streak", "membership_tier"]);
        assert!(query.user_id.is_none());
    }
}

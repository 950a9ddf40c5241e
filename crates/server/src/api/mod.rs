//! HTTP handlers, grouped by resource.

mod conditions;
mod events;
mod health;
mod loggings;
mod reward_requests;

pub use conditions::*;
pub use events::*;
pub use health::*;
pub use loggings::*;
pub use reward_requests::*;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use questline_events::EventError;

/// Header carrying the acting user's id.
pub const USER_HEADER: &str = "x-user-id";

/// Error response with a JSON `{ "error": ... }` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    problems: Vec<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            problems: Vec::new(),
        }
    }
}

impl From<EventError> for ApiError {
    fn from(err: EventError) -> Self {
        let status = match &err {
            EventError::NotFound { .. } => StatusCode::NOT_FOUND,
            EventError::DuplicateFieldName(_)
            | EventError::DuplicateRequest { .. }
            | EventError::InvalidTransition { .. } => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        };
        let problems = match &err {
            EventError::InvalidCondition { problems } => problems.clone(),
            _ => Vec::new(),
        };
        Self {
            status,
            message: err.to_string(),
            problems,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = if self.problems.is_empty() {
            json!({ "error": self.message })
        } else {
            json!({ "error": self.message, "problems": self.problems })
        };
        (self.status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Acting user from the `x-user-id` header.
fn acting_user(headers: &HeaderMap) -> ApiResult<String> {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::bad_request(format!("missing {USER_HEADER} header")))
}

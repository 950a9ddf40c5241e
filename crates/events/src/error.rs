//! Error types for the event service layer.

use crate::reward_request::RequestStatus;

/// Errors surfaced by event, condition, logging and reward-request operations.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// Lookup by id found nothing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A condition definition with this field name already exists.
    #[error("field name already defined: {0}")]
    DuplicateFieldName(String),

    /// Condition tree failed structural validation.
    #[error("event condition is invalid")]
    InvalidCondition { problems: Vec<String> },

    /// Root condition group has no children.
    #[error("event condition must contain at least one condition")]
    EmptyCondition,

    /// Start is not strictly before end.
    #[error("event start must be before its end")]
    InvalidSchedule,

    #[error("event is ongoing")]
    EventOngoing,

    #[error("event is inactive")]
    EventInactive,

    #[error("event has not started yet")]
    EventNotStarted,

    #[error("event has already ended")]
    EventEnded,

    /// User already holds a pending or approved request for the event.
    #[error("user {user_id} already has an open reward request for event {event_id}")]
    DuplicateRequest { event_id: String, user_id: String },

    /// Reward request status change not allowed from its current status.
    #[error("cannot move reward request from {from} to {to}")]
    InvalidTransition { from: RequestStatus, to: RequestStatus },

    /// Malformed input (e.g. blank names).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl EventError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        EventError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result alias for event service operations.
pub type Result<T> = std::result::Result<T, EventError>;

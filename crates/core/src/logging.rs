//! Append-only records of observed user behavior.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::Literal;

/// One observed fact about a user, correlated to condition definitions by
/// `field_name` (never by id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedEvent {
    #[serde(default = "new_log_id")]
    pub id: String,
    pub user_id: String,
    pub field_name: String,
    pub value: Literal,
    #[serde(default = "Utc::now", alias = "createdAt")]
    pub logged_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

fn new_log_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl LoggedEvent {
    pub fn new(
        user_id: impl Into<String>,
        field_name: impl Into<String>,
        value: impl Into<Literal>,
    ) -> Self {
        Self {
            id: new_log_id(),
            user_id: user_id.into(),
            field_name: field_name.into(),
            value: value.into(),
            logged_at: Utc::now(),
            metadata: None,
        }
    }

    pub fn at(mut self, logged_at: DateTime<Utc>) -> Self {
        self.logged_at = logged_at;
        self
    }

    /// Inclusive time-window check; open bounds always match.
    pub fn within(&self, started_at: Option<DateTime<Utc>>, ended_at: Option<DateTime<Utc>>) -> bool {
        started_at.map_or(true, |start| self.logged_at >= start)
            && ended_at.map_or(true, |end| self.logged_at <= end)
    }
}

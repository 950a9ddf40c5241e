//! User behavior logging: append-only records that condition trees are
//! evaluated against.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use questline_core::{Literal, LoggedEvent};

use crate::error::{EventError, Result};
use crate::store::MemoryStore;

/// Input for recording one observation about a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordLogInput {
    pub user_id: String,
    pub field_name: String,
    pub value: Literal,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Filter over recorded logs. Time bounds are inclusive; empty
/// `field_names` means every field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub field_names: Vec<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
}

impl LogQuery {
    fn matches(&self, log: &LoggedEvent) -> bool {
        self.user_id.as_deref().map_or(true, |u| log.user_id == u)
            && (self.field_names.is_empty() || self.field_names.iter().any(|f| *f == log.field_name))
            && log.within(self.started_at, self.ended_at)
    }
}

#[derive(Clone)]
pub struct UserLogging {
    store: Arc<MemoryStore>,
}

impl UserLogging {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Append a log stamped with the current time.
    pub async fn record(&self, input: RecordLogInput) -> Result<LoggedEvent> {
        if input.user_id.trim().is_empty() || input.field_name.trim().is_empty() {
            return Err(EventError::Validation(
                "userId and fieldName must not be empty".to_string(),
            ));
        }

        let mut log = LoggedEvent::new(input.user_id, input.field_name, input.value);
        log.metadata = input.metadata;
        self.store.logs.write().await.push(log.clone());

        debug!(user_id = %log.user_id, field_name = %log.field_name, "user log recorded");
        Ok(log)
    }

    /// Logs matching the query, in recording order.
    pub async fn query(&self, query: &LogQuery) -> Vec<LoggedEvent> {
        self.store
            .logs
            .read()
            .await
            .iter()
            .filter(|log| query.matches(log))
            .cloned()
            .collect()
    }

    #[cfg(test)]
    pub(crate) async fn insert(&self, log: LoggedEvent) {
        self.store.logs.write().await.push(log);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn logging() -> UserLogging {
        UserLogging::new(Arc::new(MemoryStore::new()))
    }

    fn input(user: &str, field: &str, value: impl Into<Literal>) -> RecordLogInput {
        RecordLogInput {
            user_id: user.to_string(),
            field_name: field.to_string(),
            value: value.into(),
            metadata: None,
        }
    }

    #[tokio::test]
    async fn record_and_query_by_user_and_fields() {
        let logging = logging();
        logging.record(input("u1", "login_streak", 3i64)).await.unwrap();
        logging.record(input("u1", "friends_invited", 1i64)).await.unwrap();
        logging.record(input("u2", "login_streak", 9i64)).await.unwrap();

        let all = logging.query(&LogQuery::default()).await;
        assert_eq!(all.len(), 3);

        let q = LogQuery {
            user_id: Some("u1".to_string()),
            field_names: vec!["login_streak".to_string()],
            ..Default::default()
        };
        let hits = logging.query(&q).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, Literal::Number(3.0));
    }

    #[tokio::test]
    async fn query_respects_time_window() {
        let logging = logging();
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        for day in 0..5 {
            logging
                .insert(LoggedEvent::new("u1", "attended", day as i64).at(t0 + Duration::days(day)))
                .await;
        }

        let q = LogQuery {
            started_at: Some(t0 + Duration::days(1)),
            ended_at: Some(t0 + Duration::days(3)),
            ..Default::default()
        };
        let values: Vec<f64> = logging
            .query(&q)
            .await
            .iter()
            .filter_map(|l| l.value.as_number())
            .collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[tokio::test]
    async fn blank_user_is_rejected() {
        let err = logging().record(input("", "login_streak", 1i64)).await.unwrap_err();
        assert!(matches!(err, EventError::Validation(_)));
    }
}

//! Reward requests: a user's claim on an event's rewards, decided by
//! evaluating the event's condition tree against the user's logs.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use questline_core::config::RewardConfig;
use questline_core::{LoggedEvent, Reward};
use questline_rules::{collect_condition_ids, RewardEligibilityEvaluator};

use crate::catalog::ConditionCatalog;
use crate::error::{EventError, Result};
use crate::event::{DistributionType, Event, EventPhase, EventService, EventStatus};
use crate::logging::{LogQuery, UserLogging};
use crate::store::MemoryStore;

// ── Model ───────────────────────────────────────────────────────────

/// Lifecycle: `pending` → `approved` | `rejected` on the manual path;
/// created directly as `approved` or `insufficient` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Insufficient,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Pending and approved requests block a new request for the same event.
    pub fn is_open(&self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Approved)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Insufficient => write!(f, "insufficient"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardRequest {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub determined_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub determined_by: Option<String>,
    #[serde(default)]
    pub received_rewards: Vec<Reward>,
    /// Logs the verdict was computed from.
    #[serde(default)]
    pub event_user_loggings: Vec<LoggedEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filter for [`RewardRequestService::list`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardRequestQuery {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub status: Option<RequestStatus>,
}

// ── Service ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct RewardRequestService {
    store: Arc<MemoryStore>,
    catalog: ConditionCatalog,
    logging: UserLogging,
    events: EventService,
    config: RewardConfig,
}

impl RewardRequestService {
    pub fn new(
        store: Arc<MemoryStore>,
        catalog: ConditionCatalog,
        logging: UserLogging,
        events: EventService,
        config: RewardConfig,
    ) -> Self {
        Self {
            store,
            catalog,
            logging,
            events,
            config,
        }
    }

    /// Evaluate the user against the event's condition tree and record the
    /// outcome as a new reward request.
    pub async fn request(&self, user_id: &str, event_id: &str) -> Result<RewardRequest> {
        let event = self.events.find(event_id).await?;
        if event.status == EventStatus::Inactive {
            return Err(EventError::EventInactive);
        }
        match event.phase(Utc::now()) {
            EventPhase::Upcoming => return Err(EventError::EventNotStarted),
            EventPhase::Ended => return Err(EventError::EventEnded),
            EventPhase::Ongoing => {}
        }

        let (eligible, logs) = self.check_eligibility(user_id, &event).await;
        let status = match (eligible, event.reward_distribution_type) {
            (false, _) => RequestStatus::Insufficient,
            (true, DistributionType::Manual) => RequestStatus::Pending,
            (true, DistributionType::Auto) => RequestStatus::Approved,
        };

        let now = Utc::now();
        let approved = status == RequestStatus::Approved;
        let request = RewardRequest {
            id: uuid::Uuid::new_v4().to_string(),
            event_id: event.id.clone(),
            user_id: user_id.to_string(),
            status,
            reason: None,
            determined_at: approved.then_some(now),
            determined_by: None,
            received_rewards: if approved { event.rewards.clone() } else { Vec::new() },
            event_user_loggings: logs,
            created_at: now,
            updated_at: now,
        };

        // Duplicate check and insert under one write lock.
        let mut guard = self.store.reward_requests.write().await;
        if guard
            .values()
            .any(|r| r.event_id == event.id && r.user_id == user_id && r.status.is_open())
        {
            return Err(EventError::DuplicateRequest {
                event_id: event.id,
                user_id: user_id.to_string(),
            });
        }
        guard.insert(request.id.clone(), request.clone());

        info!(
            request_id = %request.id,
            event_id = %request.event_id,
            user_id = %request.user_id,
            status = %request.status,
            "reward requested"
        );
        Ok(request)
    }

    /// Fetch the definitions and logs the event's tree needs and evaluate it.
    async fn check_eligibility(&self, user_id: &str, event: &Event) -> (bool, Vec<LoggedEvent>) {
        let ids = collect_condition_ids(&event.condition);
        let definitions = self.catalog.find_by_ids(&ids).await;

        let (started_at, ended_at) = if self.config.bound_logs_to_event_window {
            (Some(event.started_at), Some(event.ended_at))
        } else {
            (None, None)
        };
        let query = LogQuery {
            user_id: Some(user_id.to_string()),
            field_names: definitions.iter().map(|d| d.field_name.clone()).collect(),
            started_at,
            ended_at,
        };
        let logs = self.logging.query(&query).await;

        let eligible = RewardEligibilityEvaluator::evaluate(&event.condition, &definitions, &logs);
        debug!(
            event_id = %event.id,
            user_id,
            trace = %RewardEligibilityEvaluator::explain(&event.condition, &definitions, &logs),
            "eligibility evaluated"
        );
        (eligible, logs)
    }

    pub async fn approve(&self, operator: &str, id: &str) -> Result<RewardRequest> {
        self.decide(operator, id, RequestStatus::Approved, None).await
    }

    pub async fn reject(&self, operator: &str, id: &str, reason: Option<String>) -> Result<RewardRequest> {
        self.decide(operator, id, RequestStatus::Rejected, reason).await
    }

    /// Manual decision on a pending request.
    async fn decide(
        &self,
        operator: &str,
        id: &str,
        to: RequestStatus,
        reason: Option<String>,
    ) -> Result<RewardRequest> {
        // Rewards come from the event as it is when approved.
        let rewards = if to == RequestStatus::Approved {
            let event_id = self.find(id).await?.event_id;
            self.events.find(&event_id).await?.rewards
        } else {
            Vec::new()
        };

        let mut guard = self.store.reward_requests.write().await;
        let request = guard
            .get_mut(id)
            .ok_or_else(|| EventError::not_found("reward request", id))?;
        if request.status != RequestStatus::Pending {
            return Err(EventError::InvalidTransition {
                from: request.status,
                to,
            });
        }

        let now = Utc::now();
        request.status = to;
        request.reason = reason;
        request.determined_at = Some(now);
        request.determined_by = Some(operator.to_string());
        request.received_rewards = rewards;
        request.updated_at = now;

        info!(request_id = %id, status = %to, operator, "reward request decided");
        Ok(request.clone())
    }

    pub async fn find(&self, id: &str) -> Result<RewardRequest> {
        self.store
            .reward_requests
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| EventError::not_found("reward request", id))
    }

    /// Requests matching the query, newest first.
    pub async fn list(&self, query: &RewardRequestQuery) -> Vec<RewardRequest> {
        let guard = self.store.reward_requests.read().await;
        let mut list: Vec<RewardRequest> = guard
            .values()
            .filter(|r| query.event_id.as_deref().map_or(true, |e| r.event_id == e))
            .filter(|r| query.user_id.as_deref().map_or(true, |u| r.user_id == u))
            .filter(|r| query.status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        list
    }
}

//! Time-boxed promotional events carrying a condition tree and rewards.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use questline_core::Reward;
use questline_rules::ConditionGroup;

use crate::catalog::ConditionCatalog;
use crate::error::{EventError, Result};
use crate::store::MemoryStore;

// ── Model ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Active,
    Inactive,
}

/// How approved rewards are handed out: `manual` requests wait for an
/// operator, `auto` requests are approved as soon as they are eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionType {
    Manual,
    Auto,
}

/// Where `now` falls relative to an event's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Upcoming,
    Ongoing,
    Ended,
}

impl fmt::Display for EventPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventPhase::Upcoming => write!(f, "upcoming"),
            EventPhase::Ongoing => write!(f, "ongoing"),
            EventPhase::Ended => write!(f, "ended"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: EventStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub condition: ConditionGroup,
    pub reward_distribution_type: DistributionType,
    #[serde(default)]
    pub rewards: Vec<Reward>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    /// Previous versions, oldest first, without their own histories.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub histories: Vec<Event>,
}

impl Event {
    /// Schedule bounds are inclusive.
    pub fn phase(&self, now: DateTime<Utc>) -> EventPhase {
        if now < self.started_at {
            EventPhase::Upcoming
        } else if now > self.ended_at {
            EventPhase::Ended
        } else {
            EventPhase::Ongoing
        }
    }

    fn snapshot(&self) -> Event {
        Event {
            histories: Vec::new(),
            ..self.clone()
        }
    }
}

// ── Inputs ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub condition: ConditionGroup,
    pub reward_distribution_type: DistributionType,
    #[serde(default)]
    pub rewards: Vec<Reward>,
    #[serde(default)]
    pub status: Option<EventStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub condition: Option<ConditionGroup>,
    #[serde(default)]
    pub reward_distribution_type: Option<DistributionType>,
    #[serde(default)]
    pub rewards: Option<Vec<Reward>>,
}

/// Filter for [`EventService::list`]. `started_at`/`ended_at` keep events
/// starting at or after / ending at or before the given instants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<EventStatus>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
}

// ── Service ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct EventService {
    store: Arc<MemoryStore>,
    catalog: ConditionCatalog,
}

fn check_schedule(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> Result<()> {
    if started_at >= ended_at {
        return Err(EventError::InvalidSchedule);
    }
    Ok(())
}

impl EventService {
    pub fn new(store: Arc<MemoryStore>, catalog: ConditionCatalog) -> Self {
        Self { store, catalog }
    }

    async fn check_condition(&self, condition: &ConditionGroup) -> Result<()> {
        if condition.conditions.is_empty() {
            return Err(EventError::EmptyCondition);
        }
        self.catalog.assert_valid_tree(condition).await
    }

    pub async fn create(&self, creator: &str, input: CreateEventInput) -> Result<Event> {
        if input.name.trim().is_empty() {
            return Err(EventError::Validation("name must not be empty".to_string()));
        }
        check_schedule(input.started_at, input.ended_at)?;
        self.check_condition(&input.condition).await?;

        let now = Utc::now();
        let event = Event {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            status: input.status.unwrap_or_default(),
            started_at: input.started_at,
            ended_at: input.ended_at,
            condition: input.condition,
            reward_distribution_type: input.reward_distribution_type,
            rewards: input.rewards,
            created_at: now,
            updated_at: now,
            created_by: creator.to_string(),
            updated_by: None,
            histories: Vec::new(),
        };
        self.store.events.write().await.insert(event.id.clone(), event.clone());

        info!(event_id = %event.id, name = %event.name, "event created");
        Ok(event)
    }

    /// Update an event that has not started. Ongoing, inactive and ended
    /// events are frozen. The previous version is appended to `histories`.
    pub async fn update(&self, updater: &str, id: &str, input: UpdateEventInput) -> Result<Event> {
        let current = self.find(id).await?;
        match current.phase(Utc::now()) {
            EventPhase::Ongoing => return Err(EventError::EventOngoing),
            EventPhase::Ended => return Err(EventError::EventEnded),
            EventPhase::Upcoming => {}
        }
        if current.status == EventStatus::Inactive {
            return Err(EventError::EventInactive);
        }

        if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(EventError::Validation("name must not be empty".to_string()));
        }
        let started_at = input.started_at.unwrap_or(current.started_at);
        let ended_at = input.ended_at.unwrap_or(current.ended_at);
        check_schedule(started_at, ended_at)?;
        if let Some(condition) = &input.condition {
            if *condition != current.condition {
                self.check_condition(condition).await?;
            }
        }

        let mut guard = self.store.events.write().await;
        let event = guard
            .get_mut(id)
            .ok_or_else(|| EventError::not_found("event", id))?;
        let snapshot = event.snapshot();

        if let Some(name) = input.name {
            event.name = name;
        }
        if input.description.is_some() {
            event.description = input.description;
        }
        event.started_at = started_at;
        event.ended_at = ended_at;
        if let Some(condition) = input.condition {
            event.condition = condition;
        }
        if let Some(kind) = input.reward_distribution_type {
            event.reward_distribution_type = kind;
        }
        if let Some(rewards) = input.rewards {
            event.rewards = rewards;
        }
        event.updated_at = Utc::now();
        event.updated_by = Some(updater.to_string());
        event.histories.push(snapshot);

        info!(event_id = %id, revision = event.histories.len(), "event updated");
        Ok(event.clone())
    }

    /// Replace an event's rewards.
    pub async fn set_rewards(&self, updater: &str, id: &str, rewards: Vec<Reward>) -> Result<Event> {
        let mut guard = self.store.events.write().await;
        let event = guard
            .get_mut(id)
            .ok_or_else(|| EventError::not_found("event", id))?;
        event.rewards = rewards;
        event.updated_at = Utc::now();
        event.updated_by = Some(updater.to_string());
        info!(event_id = %id, rewards = event.rewards.len(), "event rewards set");
        Ok(event.clone())
    }

    pub async fn find(&self, id: &str) -> Result<Event> {
        self.store
            .events
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| EventError::not_found("event", id))
    }

    /// List events matching the query, earliest start first.
    pub async fn list(&self, query: &EventQuery) -> Result<Vec<Event>> {
        if let (Some(start), Some(end)) = (query.started_at, query.ended_at) {
            check_schedule(start, end)?;
        }
        let needle = query.name.as_deref().map(str::to_lowercase);

        let guard = self.store.events.read().await;
        let mut events: Vec<Event> = guard
            .values()
            .filter(|e| query.started_at.map_or(true, |s| e.started_at >= s))
            .filter(|e| query.ended_at.map_or(true, |end| e.ended_at <= end))
            .filter(|e| query.status.map_or(true, |s| e.status == s))
            .filter(|e| {
                needle
                    .as_deref()
                    .map_or(true, |n| e.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        events.sort_by(|a, b| a.started_at.cmp(&b.started_at).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }

    /// Count of events per status, for startup and health summaries.
    pub async fn count_by_status(&self) -> HashMap<EventStatus, usize> {
        let mut counts = HashMap::new();
        for e in self.store.events.read().await.values() {
            *counts.entry(e.status).or_insert(0) += 1;
        }
        counts
    }
}

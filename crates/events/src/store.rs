//! In-memory document store shared by the services.

use std::collections::HashMap;

use questline_core::{ConditionDefinition, ConditionId, LoggedEvent};
use tokio::sync::RwLock;

use crate::event::Event;
use crate::reward_request::RewardRequest;

/// One collection per document kind, each behind its own lock.
#[derive(Default)]
pub struct MemoryStore {
    pub(crate) conditions: RwLock<HashMap<ConditionId, ConditionDefinition>>,
    pub(crate) logs: RwLock<Vec<LoggedEvent>>,
    pub(crate) events: RwLock<HashMap<String, Event>>,
    pub(crate) reward_requests: RwLock<HashMap<String, RewardRequest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

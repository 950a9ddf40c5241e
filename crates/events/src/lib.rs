//! Event services over an in-memory document store.
//!
//! - [`catalog`]: condition definitions and tree checks
//! - [`logging`]: user behavior logs
//! - [`event`]: time-boxed events carrying a condition tree
//! - [`reward_request`]: eligibility decisions and their review

pub mod catalog;
pub mod error;
pub mod event;
pub mod logging;
pub mod reward_request;
pub mod store;

use std::sync::Arc;

use questline_core::Config;

pub use catalog::{ConditionCatalog, DefineConditionInput};
pub use error::{EventError, Result};
pub use event::{
    CreateEventInput, DistributionType, Event, EventPhase, EventQuery, EventService, EventStatus,
    UpdateEventInput,
};
pub use logging::{LogQuery, RecordLogInput, UserLogging};
pub use reward_request::{RequestStatus, RewardRequest, RewardRequestQuery, RewardRequestService};
pub use store::MemoryStore;

/// All services wired over one shared store.
#[derive(Clone)]
pub struct EventHub {
    pub catalog: ConditionCatalog,
    pub logging: UserLogging,
    pub events: EventService,
    pub requests: RewardRequestService,
}

impl EventHub {
    pub fn new(config: &Config) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: &Config, store: Arc<MemoryStore>) -> Self {
        let catalog = ConditionCatalog::new(store.clone());
        let logging = UserLogging::new(store.clone());
        let events = EventService::new(store.clone(), catalog.clone());
        let requests = RewardRequestService::new(
            store,
            catalog.clone(),
            logging.clone(),
            events.clone(),
            config.rewards.clone(),
        );
        Self {
            catalog,
            logging,
            events,
            requests,
        }
    }
}

use questline_core::Config;
use questline_events::EventHub;

/// Shared handler state.
pub struct AppState {
    pub config: Config,
    pub hub: EventHub,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let hub = EventHub::new(&config);
        Self { config, hub }
    }
}

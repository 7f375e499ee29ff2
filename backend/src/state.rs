use shared::config::PublicConfig;
use std::sync::Arc;

use crate::store::EventStore;

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: EventStore,
    pub public_config: Arc<PublicConfig>,
}

impl AppState {
    pub fn new(store: EventStore, public_config: PublicConfig) -> Self {
        Self {
            store,
            public_config: Arc::new(public_config),
        }
    }
}

use std::sync::Arc;

use crate::infra::GameLocks;
use crate::services::game_flow::GameFlowService;
use crate::store::{MemoryStore, Store};
use crate::ws::hub::{Broadcaster, GameHub};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend shared by all services
    pub store: Arc<dyn Store>,
    /// Socket registry for game event fan-out
    pub hub: Arc<GameHub>,
    /// Engine driving registrations, rounds, and player actions
    pub game_flow: Arc<GameFlowService>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        hub: Arc<GameHub>,
        game_flow: Arc<GameFlowService>,
    ) -> Self {
        Self {
            store,
            hub,
            game_flow,
        }
    }

    /// Wire a complete in-memory stack: store, hub, locks, and engine.
    pub fn in_memory() -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let hub = Arc::new(GameHub::new());
        let broadcaster: Arc<dyn Broadcaster> = hub.clone();
        let game_flow = Arc::new(GameFlowService::new(
            store.clone(),
            broadcaster,
            Arc::new(GameLocks::new()),
        ));
        Self::new(store, hub, game_flow)
    }
}

//! Per-game mutual exclusion.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Map of game id to its serialization lock. Engine operations hold the
/// game's lock across both the store mutation and the broadcast that
/// follows, so every client observes state in commit order.
#[derive(Default)]
pub struct GameLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl GameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock for a game, created on first use. Clone-out keeps the
    /// map entry unlocked while the caller awaits the mutex.
    pub fn lock_for(&self, game_id: Uuid) -> Arc<Mutex<()>> {
        self.locks
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Forgets the entry of a deleted game.
    pub fn discard(&self, game_id: Uuid) {
        self.locks.remove(&game_id);
    }
}

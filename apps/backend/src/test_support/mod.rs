//! Helpers shared by the engine's unit tests and the HTTP integration
//! tests: a broadcaster that records events instead of delivering them,
//! and builders for pre-wired game fixtures.

pub mod state_builder;

pub use state_builder::{GameFixture, TestStateBuilder};

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;

use crate::ws::hub::{Broadcaster, ClientSocket};
use crate::ws::protocol::ServerMessage;

/// One event recorded by [`CapturingBroadcaster`].
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub game_id: Uuid,
    pub message: ServerMessage,
    /// Addressee of a direct send; `None` for a broadcast.
    pub sent_to: Option<Uuid>,
    /// Player a broadcast skipped, when one was named.
    pub excluded: Option<Uuid>,
}

/// [`Broadcaster`] stand-in that records every event in order.
///
/// Engine tests drive connection state through [`join`](Self::join)
/// instead of real sockets; `register` exists so the trait is complete
/// but sessions themselves are not under test here.
#[derive(Default)]
pub struct CapturingBroadcaster {
    joined: Mutex<HashMap<Uuid, Vec<Uuid>>>,
    events: Mutex<Vec<CapturedEvent>>,
}

impl CapturingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `player_id` as connected for `game_id`.
    pub fn join(&self, game_id: Uuid, player_id: Uuid) {
        let mut joined = self.joined.lock();
        let players = joined.entry(game_id).or_default();
        if !players.contains(&player_id) {
            players.push(player_id);
        }
    }

    /// Every event recorded so far, in delivery order.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    /// Action names recorded for `game_id`, in delivery order.
    pub fn actions(&self, game_id: Uuid) -> Vec<&'static str> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.game_id == game_id)
            .map(|event| event.message.action())
            .collect()
    }

    /// Recorded messages for `game_id` with the given action name.
    pub fn messages_for(&self, game_id: Uuid, action: &str) -> Vec<ServerMessage> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.game_id == game_id && event.message.action() == action)
            .map(|event| event.message.clone())
            .collect()
    }

    /// Forget everything recorded so far; connections stay joined.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[async_trait]
impl Broadcaster for CapturingBroadcaster {
    fn register(&self, game_id: Uuid, player_id: Uuid, _socket: ClientSocket) -> Uuid {
        self.join(game_id, player_id);
        Uuid::new_v4()
    }

    fn unregister(&self, _game_id: Uuid, _token: Uuid) {}

    fn joined_players(&self, game_id: Uuid) -> Vec<Uuid> {
        self.joined.lock().get(&game_id).cloned().unwrap_or_default()
    }

    async fn broadcast(&self, game_id: Uuid, message: ServerMessage, exclude: Option<Uuid>) {
        self.events.lock().push(CapturedEvent {
            game_id,
            message,
            sent_to: None,
            excluded: exclude,
        });
    }

    async fn send_to(&self, game_id: Uuid, player_id: Uuid, message: ServerMessage) {
        self.events.lock().push(CapturedEvent {
            game_id,
            message,
            sent_to: Some(player_id),
            excluded: None,
        });
    }
}

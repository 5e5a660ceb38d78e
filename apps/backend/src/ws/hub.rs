//! Per-game socket registry with best-effort fan-out.

use actix::prelude::*;
use async_trait::async_trait;
use dashmap::DashMap;
use tracing::warn;
use uuid::Uuid;

use crate::ws::protocol::ServerMessage;

/// Envelope delivered to a session actor for forwarding to its client.
#[derive(Message, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMessage);

/// Address a registered client receives game events on.
pub type ClientSocket = Recipient<Outbound>;

/// Fan-out seam between the engine and connected sockets.
///
/// Registration is synchronous so session actors can call it from their
/// handlers; delivery is async to fit the engine's call sites.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Attach `socket` as `player_id`'s channel for `game_id` events,
    /// displacing any socket the same player registered earlier.
    /// Returns a token identifying this registration.
    fn register(&self, game_id: Uuid, player_id: Uuid, socket: ClientSocket) -> Uuid;

    /// Detach the registration identified by `token`. A registration
    /// already displaced by a reconnect is gone and this is a no-op.
    fn unregister(&self, game_id: Uuid, token: Uuid);

    /// Players currently registered for `game_id`, in join order.
    fn joined_players(&self, game_id: Uuid) -> Vec<Uuid>;

    /// Deliver `message` to every registered socket, skipping the
    /// player named by `exclude`. Delivery failures are logged and the
    /// subscriber stays registered.
    async fn broadcast(&self, game_id: Uuid, message: ServerMessage, exclude: Option<Uuid>);

    /// Deliver `message` to one registered player, if present.
    async fn send_to(&self, game_id: Uuid, player_id: Uuid, message: ServerMessage);
}

struct Subscriber {
    player_id: Uuid,
    token: Uuid,
    socket: ClientSocket,
}

/// In-process [`Broadcaster`] keyed by game id.
#[derive(Default)]
pub struct GameHub {
    subscribers: DashMap<Uuid, Vec<Subscriber>>,
}

impl GameHub {
    pub fn new() -> Self {
        Self {
            subscribers: DashMap::new(),
        }
    }

    fn deliver(game_id: Uuid, subscriber: &Subscriber, message: &ServerMessage) {
        if let Err(err) = subscriber.socket.try_send(Outbound(message.clone())) {
            warn!(
                game_id = %game_id,
                player_id = %subscriber.player_id,
                action = message.action(),
                error = %err,
                "failed to deliver game event"
            );
        }
    }
}

#[async_trait]
impl Broadcaster for GameHub {
    fn register(&self, game_id: Uuid, player_id: Uuid, socket: ClientSocket) -> Uuid {
        let token = Uuid::new_v4();
        let mut entry = self.subscribers.entry(game_id).or_default();
        entry.retain(|subscriber| subscriber.player_id != player_id);
        entry.push(Subscriber {
            player_id,
            token,
            socket,
        });
        token
    }

    fn unregister(&self, game_id: Uuid, token: Uuid) {
        if let Some(mut entry) = self.subscribers.get_mut(&game_id) {
            entry.retain(|subscriber| subscriber.token != token);
        }
        self.subscribers.remove_if(&game_id, |_, subs| subs.is_empty());
    }

    fn joined_players(&self, game_id: Uuid) -> Vec<Uuid> {
        self.subscribers
            .get(&game_id)
            .map(|entry| entry.iter().map(|subscriber| subscriber.player_id).collect())
            .unwrap_or_default()
    }

    async fn broadcast(&self, game_id: Uuid, message: ServerMessage, exclude: Option<Uuid>) {
        if let Some(entry) = self.subscribers.get(&game_id) {
            for subscriber in entry.iter() {
                if exclude == Some(subscriber.player_id) {
                    continue;
                }
                Self::deliver(game_id, subscriber, &message);
            }
        }
    }

    async fn send_to(&self, game_id: Uuid, player_id: Uuid, message: ServerMessage) {
        if let Some(entry) = self.subscribers.get(&game_id) {
            if let Some(subscriber) = entry
                .iter()
                .find(|subscriber| subscriber.player_id == player_id)
            {
                Self::deliver(game_id, subscriber, &message);
            }
        }
    }
}

//! Wire messages for the event channel, discriminated by `action`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::cards_types::{Card, Suit};
use crate::domain::state::Phase;

/// Messages a client may send over the socket.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientMessage {
    RegisterClient { game_id: Uuid, player_id: Uuid },
}

/// Messages the engine publishes to registered sockets.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ServerMessage {
    GameStart {
        game_id: Uuid,
        state: Phase,
    },
    GameState {
        game_id: Uuid,
        state: Phase,
    },
    /// `player_ids` is join order; `player_order` is seating order.
    NotificationPlayerList {
        game_id: Uuid,
        player_ids: Vec<Uuid>,
        player_order: Vec<Uuid>,
    },
    BidPrompt {
        player_id: Uuid,
        bid: i32,
    },
    BidWinner {
        player_id: Uuid,
        bid: i32,
    },
    TrumpSelected {
        trump: Suit,
    },
    MeldUpdate {
        game_id: Uuid,
        player_id: Uuid,
        card_list: Vec<Card>,
        meld_score: i32,
    },
    TeamScore {
        team_id: Uuid,
        score: i32,
        meld_score: i32,
    },
    TrickCard {
        game_id: Uuid,
        player_id: Uuid,
        card: Card,
    },
    TrickWon {
        game_id: Uuid,
        player_id: Uuid,
        winning_card: Card,
    },
    TrickNext {
        game_id: Uuid,
        player_id: Uuid,
    },
    ScoreRound {
        game_id: Uuid,
        team_id: Uuid,
        score: i32,
        trick_score: i32,
    },
}

impl ServerMessage {
    /// The wire value of the `action` discriminant, for logging.
    pub fn action(&self) -> &'static str {
        match self {
            ServerMessage::GameStart { .. } => "game_start",
            ServerMessage::GameState { .. } => "game_state",
            ServerMessage::NotificationPlayerList { .. } => "notification_player_list",
            ServerMessage::BidPrompt { .. } => "bid_prompt",
            ServerMessage::BidWinner { .. } => "bid_winner",
            ServerMessage::TrumpSelected { .. } => "trump_selected",
            ServerMessage::MeldUpdate { .. } => "meld_update",
            ServerMessage::TeamScore { .. } => "team_score",
            ServerMessage::TrickCard { .. } => "trick_card",
            ServerMessage::TrickWon { .. } => "trick_won",
            ServerMessage::TrickNext { .. } => "trick_next",
            ServerMessage::ScoreRound { .. } => "score_round",
        }
    }
}
